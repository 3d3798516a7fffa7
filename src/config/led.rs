use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedEndpointStyle {
    /// `GET /led-on`, `GET /led-off`
    Paths,
    /// `GET /control?var=flash_led&val=1`
    FlashControl,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LedConfig {
    pub base_url: Option<String>,
    pub endpoint: LedEndpointStyle,
    pub timeout_ms: u64,
    pub follow_detection: bool,
    // 连续多少帧无检测后才熄灯
    pub hold_frames: u32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint: LedEndpointStyle::FlashControl,
            timeout_ms: 2000,
            follow_detection: false,
            hold_frames: 30,
        }
    }
}
