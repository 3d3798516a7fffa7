use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("opencv: {0}")]
    Vision(#[from] opencv::Error),

    #[error("led request failed: {0}")]
    Led(#[from] reqwest::Error),

    #[error("led endpoint {url} answered {status}")]
    LedStatus { url: String, status: u16 },

    #[error("led is not configured")]
    LedNotConfigured,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("event encoding: {0}")]
    Event(#[from] serde_json::Error),

    #[error("logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}
