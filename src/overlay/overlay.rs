use opencv::{
    core::{Mat, Point, Scalar},
    imgproc,
    prelude::*,
};

use crate::error::Result;
use crate::utils::Rect;
use crate::vision::{BackgroundStatus, Detections};

// BGR
const GREEN: (f64, f64, f64) = (0.0, 255.0, 0.0);
const BLUE: (f64, f64, f64) = (255.0, 128.0, 0.0);
const YELLOW: (f64, f64, f64) = (0.0, 255.0, 255.0);
const RED: (f64, f64, f64) = (0.0, 0.0, 255.0);
const GRAY: (f64, f64, f64) = (160.0, 160.0, 160.0);

fn color((b, g, r): (f64, f64, f64)) -> Scalar {
    Scalar::new(b, g, r, 0.0)
}

/// Everything besides the boxes that ends up on the preview.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStatus {
    pub background: BackgroundStatus,
    pub detection_active: bool,
    pub led_configured: bool,
    pub led_on: bool,
}

fn label(frame: &mut Mat, text: &str, origin: Point, rgb: (f64, f64, f64)) -> Result<()> {
    imgproc::put_text(
        frame,
        text,
        origin,
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.75,
        color(rgb),
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

fn boxes(frame: &mut Mat, rects: &[Rect], rgb: (f64, f64, f64)) -> Result<()> {
    for rect in rects {
        imgproc::rectangle(frame, (*rect).into(), color(rgb), 2, imgproc::LINE_8, 0)?;
    }
    Ok(())
}

/// Draws boxes and status text onto the frame in place.
pub fn draw_overlay(frame: &mut Mat, detections: &Detections, status: &OverlayStatus) -> Result<()> {
    boxes(frame, &detections.motion, GREEN)?;
    boxes(frame, &detections.person, BLUE)?;

    if !detections.motion.is_empty() {
        label(frame, "Motion Detected", Point::new(10, 20), GREEN)?;
    }
    if !detections.person.is_empty() {
        label(frame, "Person Detected", Point::new(10, 45), BLUE)?;
    }

    let rows = frame.rows();
    match status.background {
        BackgroundStatus::Waiting(secs) => {
            let text = format!("Capturing background in {}", secs);
            label(frame, &text, Point::new(10, rows / 2), YELLOW)?;
        }
        BackgroundStatus::Captured => {
            label(frame, "Background captured", Point::new(10, rows / 2), YELLOW)?;
        }
        BackgroundStatus::Ready => {}
    }

    if !status.detection_active {
        label(frame, "Detection paused", Point::new(10, rows - 40), GRAY)?;
    }
    if status.led_configured {
        let (text, rgb) = if status.led_on {
            ("LED: ON", YELLOW)
        } else {
            ("LED: OFF", RED)
        };
        label(frame, text, Point::new(10, rows - 15), rgb)?;
    }
    Ok(())
}
