mod capture;
mod detection;
mod led;
mod system;

pub use capture::*;
pub use detection::*;
pub use led::*;
pub use system::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub detection: DetectionConfig,
    pub led: LedConfig,
    pub system: SystemConfig,
}

impl Config {
    pub fn from_toml(text: &str, path: &str) -> Result<Config> {
        let config: Config = toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: path.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Checked once, after command-line overrides have been applied.
    pub fn validate(&self) -> Result<()> {
        let motion = &self.detection.motion;
        if motion.blur_kernel <= 0 {
            return Err(Error::Config(format!(
                "detection.motion.blur_kernel must be positive, got {}",
                motion.blur_kernel
            )));
        }
        if !(0.0..=255.0).contains(&motion.threshold) {
            return Err(Error::Config(format!(
                "detection.motion.threshold must be within 0..=255, got {}",
                motion.threshold
            )));
        }
        if motion.dilate_iterations < 0 {
            return Err(Error::Config("detection.motion.dilate_iterations must not be negative".into()));
        }
        let person = &self.detection.person;
        if person.scale <= 1.0 {
            return Err(Error::Config(format!(
                "detection.person.scale must be greater than 1.0, got {}",
                person.scale
            )));
        }
        if person.win_stride <= 0 {
            return Err(Error::Config("detection.person.win_stride must be positive".into()));
        }
        if let Some(width) = self.capture.resize_width {
            if width <= 0 {
                return Err(Error::Config("capture.resize_width must be positive".into()));
            }
        }
        if let Some(url) = &self.led.base_url {
            // the http client is built without tls
            if !url.starts_with("http://") {
                return Err(Error::Config(format!("led.base_url must be a plain http:// url, got {}", url)));
            }
        }
        Ok(())
    }
}

pub fn get_config_path() -> Option<String> {
    let config_paths = vec!["config.toml", "../config.toml"];
    for path in config_paths {
        if Path::new(path).exists() {
            return Some(path.to_string());
        }
    }
    None
}

/// Where the loaded configuration came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path),
            ConfigSource::Defaults => write!(f, "built-in defaults (no config.toml found)"),
        }
    }
}

pub fn load_config_from(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read config file {}: {}", path, e)))?;
    Config::from_toml(&config_str, path)
}

/// Loads the explicit path when given, otherwise the first config file found
/// next to the working directory, otherwise built-in defaults.
pub fn load_config(explicit: Option<&str>) -> Result<(Config, ConfigSource)> {
    if let Some(path) = explicit {
        return Ok((load_config_from(path)?, ConfigSource::File(path.to_string())));
    }
    if let Some(path) = get_config_path() {
        let config = load_config_from(&path)?;
        return Ok((config, ConfigSource::File(path)));
    }
    Ok((Config::default(), ConfigSource::Defaults))
}
