pub mod background;
pub mod motion;
pub mod person;

pub use background::{BackgroundModel, BackgroundStatus, CountdownGate};
pub use motion::MotionDetector;
pub use person::PersonDetector;

use serde::Serialize;

use crate::utils::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Motion,
    Person,
}

/// Boxes found in one frame, already mapped to raw-frame coordinates.
#[derive(Debug, Clone, Default)]
pub struct Detections {
    pub motion: Vec<Rect>,
    pub person: Vec<Rect>,
}

impl Detections {
    pub fn is_empty(&self) -> bool {
        self.motion.is_empty() && self.person.is_empty()
    }

    /// Maps boxes from the processed frame back onto a `width` x `height`
    /// raw frame, dropping any that fall entirely outside it.
    pub fn scaled(self, factor: f64, width: i32, height: i32) -> Detections {
        let map = |rects: Vec<Rect>| -> Vec<Rect> {
            rects
                .iter()
                .filter_map(|r| r.scale(factor).clamp_to(width, height))
                .collect()
        };
        Detections {
            motion: map(self.motion),
            person: map(self.person),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_maps_back_to_raw_frame() {
        let detections = Detections {
            motion: vec![Rect::new(10, 10, 20, 20)],
            person: vec![Rect::new(100, 50, 64, 128)],
        };
        let scaled = detections.scaled(2.0, 640, 480);
        assert_eq!(scaled.motion, vec![Rect::new(20, 20, 40, 40)]);
        assert_eq!(scaled.person, vec![Rect::new(200, 100, 128, 256)]);
    }

    #[test]
    fn scaled_clips_and_drops_outside_boxes() {
        let detections = Detections {
            motion: vec![Rect::new(300, 200, 40, 40), Rect::new(400, 400, 10, 10)],
            person: vec![],
        };
        let scaled = detections.scaled(1.0, 320, 240);
        assert_eq!(scaled.motion, vec![Rect::new(300, 200, 20, 40)]);
        assert!(scaled.person.is_empty());
    }
}
