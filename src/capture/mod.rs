mod camera;

pub use camera::{Camera, CaptureSource};

use opencv::{
    core::{self, Mat},
    imgproc,
    prelude::*,
};

use crate::config::CaptureConfig;
use crate::error::Result;

/// Mirrors and optionally downsizes a raw frame, as configured.
/// Returns the processed frame and the factor that maps its coordinates back
/// to the raw frame.
pub fn prepare_frame(raw: &Mat, config: &CaptureConfig) -> Result<(Mat, f64)> {
    let mut frame = if config.mirror {
        let mut flipped = Mat::default();
        core::flip(raw, &mut flipped, 1)?;
        flipped
    } else {
        raw.try_clone()?
    };

    let mut factor = 1.0;
    if let Some(target) = config.resize_width {
        let size = frame.size()?;
        if size.width > target {
            factor = size.width as f64 / target as f64;
            let height = (size.height as f64 / factor).round() as i32;
            let mut resized = Mat::default();
            imgproc::resize(
                &frame,
                &mut resized,
                core::Size::new(target, height.max(1)),
                0.0,
                0.0,
                imgproc::INTER_AREA,
            )?;
            frame = resized;
        }
    }
    Ok((frame, factor))
}
