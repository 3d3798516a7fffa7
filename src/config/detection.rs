use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    Motion,
    Person,
    Both,
}

impl DetectionMode {
    pub fn motion(&self) -> bool {
        matches!(self, DetectionMode::Motion | DetectionMode::Both)
    }

    pub fn person(&self) -> bool {
        matches!(self, DetectionMode::Person | DetectionMode::Both)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DetectionConfig {
    pub mode: DetectionMode,
    pub background: BackgroundConfig,
    pub motion: MotionConfig,
    pub person: PersonConfig,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::Motion,
            background: BackgroundConfig::default(),
            motion: MotionConfig::default(),
            person: PersonConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct BackgroundConfig {
    // 0 表示直接使用第一帧作为背景
    pub countdown_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MotionConfig {
    pub blur_kernel: i32,
    pub threshold: f64,
    pub dilate_iterations: i32,
    pub min_area: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 21,
            threshold: 30.0,
            dilate_iterations: 2,
            min_area: 500.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PersonConfig {
    pub win_stride: i32,
    pub padding: i32,
    pub scale: f64,
    pub hit_threshold: f64,
    pub min_confidence: f64,
    pub overlap_threshold: f32,
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            win_stride: 8,
            padding: 8,
            scale: 1.05,
            hit_threshold: 0.0,
            min_confidence: 0.5,
            overlap_threshold: 0.65,
        }
    }
}
