use log::debug;
use opencv::{
    core::{Mat, Size, Vector},
    objdetect::HOGDescriptor,
    prelude::*,
};

use crate::config::PersonConfig;
use crate::error::Result;
use crate::utils::Rect;

// HOG 默认行人窗口 64x128，比它小的帧直接跳过
const MIN_WIDTH: i32 = 64;
const MIN_HEIGHT: i32 = 128;

/// Pre-trained HOG + linear SVM person detector.
pub struct PersonDetector {
    hog: HOGDescriptor,
    settings: PersonConfig,
}

impl PersonDetector {
    pub fn new(settings: &PersonConfig) -> Result<Self> {
        let mut hog = HOGDescriptor::default()?;
        hog.set_svm_detector(&HOGDescriptor::get_default_people_detector()?)?;
        Ok(Self {
            hog,
            settings: settings.clone(),
        })
    }

    pub fn detect(&self, frame: &Mat) -> Result<Vec<Rect>> {
        let size = frame.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            return Ok(Vec::new());
        }

        let mut found: Vector<opencv::core::Rect> = Vector::new();
        let mut weights: Vector<f64> = Vector::new();
        let stride = self.settings.win_stride;
        let padding = self.settings.padding;
        self.hog.detect_multi_scale_weights(
            frame,
            &mut found,
            &mut weights,
            self.settings.hit_threshold,
            Size::new(stride, stride),
            Size::new(padding, padding),
            self.settings.scale,
            2.0,
            false,
        )?;

        let scored: Vec<(Rect, f64)> = found
            .iter()
            .zip(weights.iter())
            .map(|(r, w)| (Rect::from(r), w))
            .collect();
        let raw = scored.len();
        let kept = suppress_overlaps(
            scored,
            self.settings.min_confidence,
            self.settings.overlap_threshold,
        );
        debug!("[PersonDetector::detect] {} raw, {} kept", raw, kept.len());
        Ok(kept)
    }
}

/// Drops boxes below `min_confidence`, then greedily keeps the strongest box
/// of every group overlapping by more than `overlap_threshold` IoU.
pub fn suppress_overlaps(
    mut scored: Vec<(Rect, f64)>,
    min_confidence: f64,
    overlap_threshold: f32,
) -> Vec<Rect> {
    scored.retain(|(_, w)| *w >= min_confidence);
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: Vec<Rect> = Vec::new();
    for (rect, _) in scored {
        if kept.iter().all(|k| k.iou(&rect) <= overlap_threshold) {
            kept.push(rect);
        }
    }
    kept
}
