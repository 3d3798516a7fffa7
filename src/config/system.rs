use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: Option<String>,
    pub headless: bool,
    /// Append detection events as JSON lines to this file.
    pub event_log: Option<String>,
}
