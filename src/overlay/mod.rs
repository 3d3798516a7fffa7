use log::{info, warn};
use opencv::{core::Mat, highgui, prelude::*};

pub mod overlay;

pub use overlay::{draw_overlay, OverlayStatus};

use crate::error::Result;

/// The highgui preview window. Absent in headless mode.
pub struct OverlayWindow {
    title: String,
    open: bool,
}

impl OverlayWindow {
    pub fn create(title: &str) -> Result<OverlayWindow> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        info!("[OverlayWindow::create] create preview window {}", title);
        Ok(OverlayWindow {
            title: title.to_string(),
            open: true,
        })
    }

    pub fn show(&self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.title, frame)?;
        Ok(())
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("[OverlayWindow::close] destroy windows failed: {}", e);
        }
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        self.close();
    }
}
