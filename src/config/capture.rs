use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Device index ("0") or stream url ("http://192.168.1.50:81/stream").
    pub source: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    // 镜像显示，和原先的 cv2.flip(frame, 1) 一致
    pub mirror: bool,
    // 仅用于加速检测：把帧缩放到该宽度，等比缩放高度
    pub resize_width: Option<i32>,
    pub window_title: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: "0".to_string(),
            width: None,
            height: None,
            mirror: true,
            resize_width: None,
            window_title: "Webcam Monitor".to_string(),
        }
    }
}
