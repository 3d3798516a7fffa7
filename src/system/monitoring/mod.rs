mod monitor_state;

pub use monitor_state::MonitorState;

use log::{debug, error, info, warn};
use opencv::{core::Mat, prelude::*};
use std::time::Instant;

use crate::{
    capture::{self, Camera},
    config::Config,
    error::Result,
    events::{DetectionEvent, EventEmitter},
    keys::{self, KeyCommand},
    led::{LedClient, LedFollower},
    overlay::{draw_overlay, OverlayStatus, OverlayWindow},
    vision::{BackgroundModel, BackgroundStatus, Detections, MotionDetector, PersonDetector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub frames_with_detections: u64,
}

pub struct Monitor {
    config: Config,
    camera: Camera,
    window: Option<OverlayWindow>,
    motion: MotionDetector,
    person: Option<PersonDetector>,
    background: BackgroundModel,
    led: LedClient,
    follower: Option<LedFollower>,
    emitter: EventEmitter,
    state: MonitorState,
}

impl Monitor {
    pub fn new(config: Config, camera: Camera, max_frames: Option<u64>) -> Result<Monitor> {
        let window = if config.system.headless {
            None
        } else {
            Some(OverlayWindow::create(&config.capture.window_title)?)
        };
        let person = if config.detection.mode.person() {
            Some(PersonDetector::new(&config.detection.person)?)
        } else {
            None
        };
        let follower = if config.led.follow_detection && config.led.base_url.is_some() {
            Some(LedFollower::new(config.led.hold_frames))
        } else {
            None
        };
        Ok(Monitor {
            motion: MotionDetector::new(&config.detection.motion),
            person,
            background: BackgroundModel::new(config.detection.background.countdown_secs, Instant::now()),
            led: LedClient::new(&config.led)?,
            follower,
            emitter: EventEmitter::new(config.system.event_log.as_deref())?,
            state: MonitorState::new(max_frames),
            window,
            camera,
            config,
        })
    }

    /// Runs until `q`, a failed frame read, or the frame limit.
    /// Cleanup happens on every exit path.
    pub fn run(mut self) -> Result<RunSummary> {
        info!(
            "[run] monitoring {} (mode: {:?}, headless: {})",
            self.camera.source(),
            self.config.detection.mode,
            self.window.is_none()
        );
        let result = self.run_loop();
        self.cleanup();
        result.map(|_| RunSummary {
            frames: self.state.frame_index,
            frames_with_detections: self.state.frames_with_detections,
        })
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            let raw = match self.camera.read() {
                Some(frame) => frame,
                None => {
                    info!("[run] no more frames, stopping");
                    return Ok(());
                }
            };
            if self.cal(&raw)? == Step::Stop {
                return Ok(());
            }
            if !self.state.advance() {
                info!("[run] reached frame limit {}", self.state.frame_index);
                return Ok(());
            }
        }
    }

    fn cal(&mut self, raw: &Mat) -> Result<Step> {
        let (mut frame, factor) = capture::prepare_frame(raw, &self.config.capture)?;
        let raw_size = raw.size()?;

        let detections = match self.detect(&frame) {
            Ok((status, detections)) => {
                self.draw(&mut frame, status, &detections);
                detections.scaled(factor, raw_size.width, raw_size.height)
            }
            Err(e) => {
                error!("[cal] frame {} processing failed: {}", self.state.frame_index, e);
                Detections::default()
            }
        };

        if !detections.is_empty() {
            self.state.frames_with_detections += 1;
            for event in DetectionEvent::from_detections(self.state.frame_index, &detections) {
                if let Err(e) = self.emitter.emit(&event) {
                    warn!("[cal] emit event failed: {}", e);
                }
            }
        }

        self.follow_led(!detections.is_empty());

        match &self.window {
            Some(window) => {
                window.show(&frame)?;
                Ok(self.handle_key(keys::poll()?))
            }
            None => Ok(Step::Continue),
        }
    }

    /// Boxes are in `frame` coordinates here; the caller rescales them.
    fn detect(&mut self, frame: &Mat) -> Result<(BackgroundStatus, Detections)> {
        let mut detections = Detections::default();
        let prepared = self.motion.prepare(frame)?;
        let status = self.background.observe(&prepared, Instant::now())?;

        if status != BackgroundStatus::Ready || !self.state.detection_active {
            return Ok((status, detections));
        }

        if self.config.detection.mode.motion() {
            if let Some(reference) = self.background.reference() {
                detections.motion = self.motion.detect(reference, &prepared)?;
            }
        }
        if let Some(person) = &self.person {
            detections.person = person.detect(frame)?;
        }
        if !detections.is_empty() {
            debug!(
                "[detect] frame {}: {} motion, {} person",
                self.state.frame_index,
                detections.motion.len(),
                detections.person.len()
            );
        }
        Ok((status, detections))
    }

    fn draw(&self, frame: &mut Mat, background: BackgroundStatus, detections: &Detections) {
        if self.window.is_none() {
            return;
        }
        let status = OverlayStatus {
            background,
            detection_active: self.state.detection_active,
            led_configured: self.led.is_configured(),
            led_on: self.led.is_on(),
        };
        if let Err(e) = draw_overlay(frame, detections, &status) {
            error!("[draw] draw overlay failed: {}", e);
        }
    }

    fn follow_led(&mut self, detected: bool) {
        if let Some(follower) = self.follower.as_mut() {
            follower.drive(&mut self.led, detected);
        }
    }

    fn handle_key(&mut self, command: Option<KeyCommand>) -> Step {
        let Some(command) = command else {
            return Step::Continue;
        };
        debug!("[handle_key] {:?}", command);
        match command {
            KeyCommand::Quit => {
                info!("[handle_key] quit requested");
                return Step::Stop;
            }
            KeyCommand::ToggleLed => {
                if !self.led.is_configured() {
                    warn!("[handle_key] no led.base_url configured, ignoring toggle");
                } else if let Err(e) = self.led.toggle() {
                    warn!("[handle_key] toggle led failed: {}", e);
                }
            }
            KeyCommand::ResetBackground => self.background.reset(Instant::now()),
            KeyCommand::ToggleDetection => {
                let active = self.state.toggle_detection();
                info!("[handle_key] detection {}", if active { "resumed" } else { "paused" });
            }
        }
        Step::Continue
    }

    fn cleanup(&mut self) {
        info!("[cleanup] closing application");
        self.led.shutdown();
        if let Err(e) = self.emitter.flush() {
            warn!("[cleanup] flush events failed: {}", e);
        }
        self.camera.release();
        if let Some(window) = self.window.as_mut() {
            window.close();
        }
    }
}
