use log::{info, warn};
use opencv::{core::Mat, prelude::*};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Wall-clock countdown before the background frame is taken.
#[derive(Debug, Clone)]
pub struct CountdownGate {
    delay: Duration,
    started: Instant,
}

impl CountdownGate {
    pub fn new(delay: Duration, now: Instant) -> Self {
        Self { delay, started: now }
    }

    pub fn rearm(&mut self, now: Instant) {
        self.started = now;
    }

    pub fn is_open(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.delay
    }

    /// Whole seconds left, rounded up, for the on-screen counter.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started);
        let left = self.delay.saturating_sub(elapsed);
        let secs = left.as_secs();
        if left.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundStatus {
    /// Still counting down, seconds left.
    Waiting(u64),
    /// This frame became the reference; nothing to compare against yet.
    Captured,
    /// A reference exists and the frame can be compared.
    Ready,
}

/// Single reference frame, kept until exit or an explicit reset.
pub struct BackgroundModel {
    reference: Option<Mat>,
    gate: CountdownGate,
}

impl BackgroundModel {
    pub fn new(countdown_secs: u64, now: Instant) -> Self {
        Self {
            reference: None,
            gate: CountdownGate::new(Duration::from_secs(countdown_secs), now),
        }
    }

    pub fn reference(&self) -> Option<&Mat> {
        self.reference.as_ref()
    }

    /// Feeds a prepared (gray, blurred) frame through the countdown gate.
    pub fn observe(&mut self, prepared: &Mat, now: Instant) -> Result<BackgroundStatus> {
        if let Some(reference) = &self.reference {
            if reference.size()? == prepared.size()? {
                return Ok(BackgroundStatus::Ready);
            }
            warn!(
                "[BackgroundModel::observe] frame size changed from {:?} to {:?}, retaking background",
                reference.size()?,
                prepared.size()?
            );
            self.reference = None;
        }

        if !self.gate.is_open(now) {
            return Ok(BackgroundStatus::Waiting(self.gate.remaining_secs(now)));
        }

        self.reference = Some(prepared.try_clone()?);
        info!("[BackgroundModel::observe] background captured");
        Ok(BackgroundStatus::Captured)
    }

    pub fn reset(&mut self, now: Instant) {
        self.reference = None;
        self.gate.rearm(now);
        info!("[BackgroundModel::reset] background cleared, countdown re-armed");
    }
}
