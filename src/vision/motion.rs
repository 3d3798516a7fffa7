use log::debug;
use opencv::{
    core::{self, Mat, Point, Size, Vector},
    imgproc,
    prelude::*,
};

use crate::config::MotionConfig;
use crate::error::Result;
use crate::utils::Rect;

/// Background-subtraction motion detector.
///
/// Frames go through grayscale and Gaussian blur once (`prepare`), then are
/// compared against the stored reference: absolute difference, binary
/// threshold, dilation, and external contours above `min_area`.
pub struct MotionDetector {
    settings: MotionConfig,
    kernel: Size,
}

impl MotionDetector {
    pub fn new(settings: &MotionConfig) -> Self {
        // GaussianBlur 只接受奇数核
        let k = if settings.blur_kernel % 2 == 0 {
            settings.blur_kernel + 1
        } else {
            settings.blur_kernel
        };
        Self {
            settings: settings.clone(),
            kernel: Size::new(k, k),
        }
    }

    pub fn kernel_size(&self) -> i32 {
        self.kernel.width
    }

    pub fn prepare(&self, frame: &Mat) -> Result<Mat> {
        let gray = if frame.channels() == 1 {
            frame.try_clone()?
        } else {
            let mut gray = Mat::default();
            imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;
            gray
        };
        let mut blurred = Mat::default();
        imgproc::gaussian_blur_def(&gray, &mut blurred, self.kernel, 0.0)?;
        Ok(blurred)
    }

    /// Binary, dilated difference mask between `background` and `prepared`.
    pub fn mask(&self, background: &Mat, prepared: &Mat) -> Result<Mat> {
        let mut delta = Mat::default();
        core::absdiff(background, prepared, &mut delta)?;

        let mut thresh = Mat::default();
        imgproc::threshold(
            &delta,
            &mut thresh,
            self.settings.threshold,
            255.0,
            imgproc::THRESH_BINARY,
        )?;

        if self.settings.dilate_iterations == 0 {
            return Ok(thresh);
        }
        let mut dilated = Mat::default();
        imgproc::dilate(
            &thresh,
            &mut dilated,
            &Mat::default(),
            Point::new(-1, -1),
            self.settings.dilate_iterations,
            core::BORDER_CONSTANT,
            imgproc::morphology_default_border_value()?,
        )?;
        Ok(dilated)
    }

    pub fn detect(&self, background: &Mat, prepared: &Mat) -> Result<Vec<Rect>> {
        let mask = self.mask(background, prepared)?;

        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours_def(
            &mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
        )?;

        let mut boxes = Vec::new();
        for contour in contours.iter() {
            if imgproc::contour_area_def(&contour)? < self.settings.min_area {
                continue;
            }
            boxes.push(Rect::from(imgproc::bounding_rect(&contour)?));
        }
        debug!(
            "[MotionDetector::detect] {} contours, {} above min area {}",
            contours.len(),
            boxes.len(),
            self.settings.min_area
        );
        Ok(boxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    fn blank(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn paint(frame: &mut Mat, rect: Rect) {
        imgproc::rectangle(
            frame,
            rect.into(),
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
    }

    #[test]
    fn even_kernel_rounds_up() {
        let settings = MotionConfig {
            blur_kernel: 20,
            ..MotionConfig::default()
        };
        assert_eq!(MotionDetector::new(&settings).kernel_size(), 21);
    }

    #[test]
    fn identical_frames_have_no_motion() {
        let detector = MotionDetector::new(&MotionConfig::default());
        let background = detector.prepare(&blank(320, 240)).unwrap();
        let frame = detector.prepare(&blank(320, 240)).unwrap();
        assert!(detector.detect(&background, &frame).unwrap().is_empty());
    }

    #[test]
    fn bright_patch_is_one_box() {
        let detector = MotionDetector::new(&MotionConfig::default());
        let background = detector.prepare(&blank(320, 240)).unwrap();

        let mut moved = blank(320, 240);
        let patch = Rect::new(100, 80, 60, 60);
        paint(&mut moved, patch);
        let frame = detector.prepare(&moved).unwrap();

        let boxes = detector.detect(&background, &frame).unwrap();
        assert_eq!(boxes.len(), 1);
        let found = boxes[0];
        assert!(found.contains_point(patch.x, patch.y));
        assert!(found.contains_point(patch.right() - 1, patch.bottom() - 1));
    }

    #[test]
    fn small_patch_is_filtered_by_area() {
        let detector = MotionDetector::new(&MotionConfig {
            min_area: 5000.0,
            ..MotionConfig::default()
        });
        let background = detector.prepare(&blank(320, 240)).unwrap();

        let mut moved = blank(320, 240);
        paint(&mut moved, Rect::new(10, 10, 20, 20));
        let frame = detector.prepare(&moved).unwrap();

        assert!(detector.detect(&background, &frame).unwrap().is_empty());
    }
}
