use log::{debug, info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_ANY},
};
use std::fmt;

use crate::config::CaptureConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    /// Local webcam by index.
    Device(i32),
    /// Network stream, e.g. an ESP32-CAM `http://ip:81/stream`.
    Url(String),
}

impl CaptureSource {
    pub fn parse(value: &str) -> CaptureSource {
        let value = value.trim();
        match value.parse::<i32>() {
            Ok(index) if index >= 0 => CaptureSource::Device(index),
            _ => CaptureSource::Url(value.to_string()),
        }
    }
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CaptureSource::Device(index) => write!(f, "device {}", index),
            CaptureSource::Url(url) => write!(f, "{}", url),
        }
    }
}

pub struct Camera {
    source: CaptureSource,
    capture: VideoCapture,
    released: bool,
}

impl Camera {
    pub fn open(config: &CaptureConfig) -> Result<Camera> {
        let source = CaptureSource::parse(&config.source);
        let mut capture = match &source {
            CaptureSource::Device(index) => VideoCapture::new(*index, CAP_ANY)?,
            CaptureSource::Url(url) => VideoCapture::from_file(url, CAP_ANY)?,
        };
        if !capture.is_opened()? {
            return Err(Error::DeviceUnavailable(source.to_string()));
        }

        if let Some(width) = config.width {
            if !capture.set(videoio::CAP_PROP_FRAME_WIDTH, width as f64)? {
                warn!("[Camera::open] {} ignored frame width {}", source, width);
            }
        }
        if let Some(height) = config.height {
            if !capture.set(videoio::CAP_PROP_FRAME_HEIGHT, height as f64)? {
                warn!("[Camera::open] {} ignored frame height {}", source, height);
            }
        }

        info!(
            "[Camera::open] opened {} at {}x{}",
            source,
            capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0),
            capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0)
        );
        Ok(Camera {
            source,
            capture,
            released: false,
        })
    }

    pub fn source(&self) -> &CaptureSource {
        &self.source
    }

    /// `None` when the device stops delivering frames, including when the
    /// backend raises on a dropped stream.
    pub fn read(&mut self) -> Option<Mat> {
        let mut frame = Mat::default();
        let grabbed = self.capture.read(&mut frame);
        frame_or_end(grabbed, frame, &self.source)
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            warn!("[Camera::release] release {} failed: {}", self.source, e);
        } else {
            info!("[Camera::release] released {}", self.source);
        }
    }
}

fn frame_or_end(grabbed: opencv::Result<bool>, frame: Mat, source: &CaptureSource) -> Option<Mat> {
    match grabbed {
        Ok(true) if !frame.empty() => Some(frame),
        Ok(_) => {
            debug!("[Camera::read] no frame from {}", source);
            None
        }
        Err(e) => {
            warn!("[Camera::read] reading {} failed: {}", source, e);
            None
        }
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.release();
    }
}
