use clap::Parser;

use crate::config::{Config, DetectionMode};

#[derive(Parser, Debug, Default)]
#[command(name = "cam-sentry", version, about = "Webcam / IP-camera motion and person monitor")]
pub struct Cli {
    #[arg(long, help = "Path to config.toml (default: ./config.toml or ../config.toml)")]
    pub config: Option<String>,
    #[arg(long, help = "Camera index or stream url, overrides capture.source")]
    pub source: Option<String>,
    #[arg(long, value_enum, help = "What to detect, overrides detection.mode")]
    pub mode: Option<DetectionMode>,
    #[arg(long, default_value_t = false, help = "Run without a preview window")]
    pub headless: bool,
    #[arg(long, help = "LED device base url, e.g. http://192.168.4.1")]
    pub led_url: Option<String>,
    #[arg(long, help = "Log level, e.g. info or debug")]
    pub log_level: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), help = "Stop after this many frames (at least 1)")]
    pub max_frames: Option<u64>,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(source) = &self.source {
            config.capture.source = source.clone();
        }
        if let Some(mode) = self.mode {
            config.detection.mode = mode;
        }
        if self.headless {
            config.system.headless = true;
        }
        if let Some(url) = &self.led_url {
            config.led.base_url = Some(url.clone());
        }
        if let Some(level) = &self.log_level {
            config.system.log_level = Some(level.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "cam-sentry",
            "--source",
            "http://10.0.0.7:81/stream",
            "--mode",
            "both",
            "--headless",
            "--led-url",
            "http://10.0.0.7",
            "--max-frames",
            "50",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.capture.source, "http://10.0.0.7:81/stream");
        assert_eq!(config.detection.mode, DetectionMode::Both);
        assert!(config.system.headless);
        assert_eq!(config.led.base_url.as_deref(), Some("http://10.0.0.7"));
        assert_eq!(cli.max_frames, Some(50));
    }

    #[test]
    fn zero_frame_limit_is_rejected() {
        assert!(Cli::try_parse_from(["cam-sentry", "--max-frames", "0"]).is_err());
        let cli = Cli::try_parse_from(["cam-sentry", "--max-frames", "1"]).unwrap();
        assert_eq!(cli.max_frames, Some(1));
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let cli = Cli::parse_from(["cam-sentry"]);
        let mut config = Config::default();
        config.system.headless = true;
        cli.apply(&mut config);
        assert!(config.system.headless);
        assert_eq!(config.capture.source, "0");
    }
}
