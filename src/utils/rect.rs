use serde::{Deserialize, Serialize};

/// Axis-aligned box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.right().min(other.right()) - x;
        let height = self.bottom().min(other.bottom()) - y;

        Some(Rect::new(x, y, width, height))
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Intersection over union, 0.0 for disjoint or empty boxes.
    pub fn iou(&self, other: &Rect) -> f32 {
        let inter = match self.intersection(other) {
            Some(r) => r.area() as f32,
            None => return 0.0,
        };
        let union = (self.area() + other.area()) as f32 - inter;
        if union <= 0.0 {
            0.0
        } else {
            inter / union
        }
    }

    /// Maps a box found on a downscaled frame back to the original resolution.
    pub fn scale(&self, factor: f64) -> Rect {
        Rect::new(
            (self.x as f64 * factor).round() as i32,
            (self.y as f64 * factor).round() as i32,
            (self.width as f64 * factor).round() as i32,
            (self.height as f64 * factor).round() as i32,
        )
    }

    /// Clips the box to a `width` x `height` frame.
    pub fn clamp_to(&self, width: i32, height: i32) -> Option<Rect> {
        self.intersection(&Rect::new(0, 0, width, height))
    }
}

impl From<opencv::core::Rect> for Rect {
    fn from(r: opencv::core::Rect) -> Self {
        Rect::new(r.x, r.y, r.width, r.height)
    }
}

impl From<Rect> for opencv::core::Rect {
    fn from(r: Rect) -> Self {
        opencv::core::Rect::new(r.x, r.y, r.width, r.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_boxes() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert!(a.intersection(&Rect::new(10, 0, 5, 5)).is_none());
    }

    #[test]
    fn iou_bounds() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.iou(&a), 1.0);
        assert_eq!(a.iou(&Rect::new(20, 20, 5, 5)), 0.0);
        let half = a.iou(&Rect::new(0, 0, 10, 5));
        assert!((half - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scale_and_clamp() {
        let r = Rect::new(10, 20, 30, 40).scale(2.0);
        assert_eq!(r, Rect::new(20, 40, 60, 80));
        assert_eq!(r.clamp_to(50, 50), Some(Rect::new(20, 40, 30, 10)));
        assert_eq!(Rect::new(60, 60, 5, 5).clamp_to(50, 50), None);
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(0, 0, 4, 4);
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(3, 3));
        assert!(!r.contains_point(4, 0));
    }
}
