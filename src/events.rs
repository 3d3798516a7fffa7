use log::{debug, info};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::utils::Rect;
use crate::vision::{DetectionKind, Detections};

#[derive(Debug, Clone, Serialize)]
pub struct DetectionEvent {
    pub timestamp_ms: u64,
    pub frame: u64,
    pub kind: DetectionKind,
    pub boxes: Vec<Rect>,
}

impl DetectionEvent {
    /// One event per non-empty detection kind.
    pub fn from_detections(frame: u64, detections: &Detections) -> Vec<DetectionEvent> {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut events = Vec::new();
        if !detections.motion.is_empty() {
            events.push(DetectionEvent {
                timestamp_ms,
                frame,
                kind: DetectionKind::Motion,
                boxes: detections.motion.clone(),
            });
        }
        if !detections.person.is_empty() {
            events.push(DetectionEvent {
                timestamp_ms,
                frame,
                kind: DetectionKind::Person,
                boxes: detections.person.clone(),
            });
        }
        events
    }
}

/// Writes detection events as JSON lines, or to the debug log without a file.
pub struct EventEmitter {
    sink: Option<BufWriter<File>>,
}

impl EventEmitter {
    pub fn new(path: Option<&str>) -> Result<EventEmitter> {
        let sink = match path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                info!("[EventEmitter::new] appending detection events to {}", path);
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(EventEmitter { sink })
    }

    pub fn emit(&mut self, event: &DetectionEvent) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => {
                serde_json::to_writer(&mut *sink, event)?;
                sink.write_all(b"\n")?;
            }
            None => debug!("[emit] {}", serde_json::to_string(event)?),
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventEmitter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
