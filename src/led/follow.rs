use log::warn;

use super::LedClient;

/// Decides when the LED should mirror detections.
///
/// On as soon as something is detected, off again once `hold_frames`
/// consecutive frames came back empty. Only transitions of the wanted state
/// produce a command, so a device that rejects a request is not asked again
/// until the wanted state flips.
#[derive(Debug, Clone)]
pub struct LedFollower {
    hold_frames: u32,
    quiet: u32,
    wanted: bool,
}

impl LedFollower {
    pub fn new(hold_frames: u32) -> Self {
        Self {
            hold_frames,
            quiet: 0,
            wanted: false,
        }
    }

    /// Returns the state to switch to, or `None` when nothing changed.
    pub fn update(&mut self, detected: bool) -> Option<bool> {
        let next = if detected {
            self.quiet = 0;
            true
        } else {
            self.quiet = self.quiet.saturating_add(1);
            self.wanted && self.quiet < self.hold_frames
        };
        if next == self.wanted {
            return None;
        }
        self.wanted = next;
        Some(next)
    }

    /// Feeds one frame and sends at most one request; failures are logged.
    pub fn drive(&mut self, led: &mut LedClient, detected: bool) {
        if let Some(on) = self.update(detected) {
            if let Err(e) = led.set(on) {
                warn!(
                    "[LedFollower::drive] switching led {} failed: {}",
                    if on { "on" } else { "off" },
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_on_immediately() {
        let mut f = LedFollower::new(3);
        assert_eq!(f.update(true), Some(true));
        assert_eq!(f.update(true), None);
    }

    #[test]
    fn holds_before_switching_off() {
        let mut f = LedFollower::new(3);
        f.update(true);
        assert_eq!(f.update(false), None);
        assert_eq!(f.update(false), None);
        assert_eq!(f.update(false), Some(false));
        assert_eq!(f.update(false), None);
    }

    #[test]
    fn detection_resets_quiet_count() {
        let mut f = LedFollower::new(2);
        f.update(true);
        assert_eq!(f.update(false), None);
        assert_eq!(f.update(true), None);
        assert_eq!(f.update(false), None);
        assert_eq!(f.update(false), Some(false));
    }

    #[test]
    fn never_sends_off_when_never_on() {
        let mut f = LedFollower::new(1);
        assert_eq!(f.update(false), None);
        assert_eq!(f.update(false), None);
    }

    #[test]
    fn one_command_per_transition_regardless_of_outcome() {
        let mut f = LedFollower::new(2);
        let commands: Vec<bool> = [true, true, true, false, false, false, true]
            .iter()
            .filter_map(|d| f.update(*d))
            .collect();
        assert_eq!(commands, vec![true, false, true]);
    }
}
