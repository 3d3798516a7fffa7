/// Scalar flags carried from one frame to the next.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub detection_active: bool,
    pub frame_index: u64,
    pub frames_with_detections: u64,
    pub max_frames: Option<u64>,
}

impl MonitorState {
    pub fn new(max_frames: Option<u64>) -> Self {
        Self {
            detection_active: true,
            frame_index: 0,
            frames_with_detections: 0,
            max_frames,
        }
    }

    /// Counts a processed frame; false once the frame limit is reached.
    pub fn advance(&mut self) -> bool {
        self.frame_index += 1;
        match self.max_frames {
            Some(max) => self.frame_index < max,
            None => true,
        }
    }

    pub fn toggle_detection(&mut self) -> bool {
        self.detection_active = !self.detection_active;
        self.detection_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_frame_limit() {
        let mut state = MonitorState::new(Some(3));
        assert!(state.advance());
        assert!(state.advance());
        assert!(!state.advance());
        assert_eq!(state.frame_index, 3);
    }

    #[test]
    fn unlimited_without_max() {
        let mut state = MonitorState::new(None);
        for _ in 0..1000 {
            assert!(state.advance());
        }
    }

    #[test]
    fn toggles_detection() {
        let mut state = MonitorState::new(None);
        assert!(!state.toggle_detection());
        assert!(state.toggle_detection());
    }
}
