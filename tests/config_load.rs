use std::fs;

use cam_sentry_lib::config::{load_config, ConfigSource, DetectionMode, LedEndpointStyle};
use cam_sentry_lib::Error;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path.to_string_lossy().into_owned()
}

#[test]
fn loads_explicit_config_file() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_config(
        &dir,
        r#"
[capture]
source = "http://192.168.1.50:81/stream"
mirror = false
resize_width = 640

[detection]
mode = "person"

[detection.background]
countdown_secs = 5

[led]
base_url = "http://192.168.1.50"
endpoint = "flash_control"
timeout_ms = 500

[system]
log_level = "debug"
headless = true
"#,
    );

    let (cfg, source) = load_config(Some(path.as_str())).expect("load config");
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.capture.source, "http://192.168.1.50:81/stream");
    assert!(!cfg.capture.mirror);
    assert_eq!(cfg.capture.resize_width, Some(640));
    assert_eq!(cfg.detection.mode, DetectionMode::Person);
    assert_eq!(cfg.detection.background.countdown_secs, 5);
    assert_eq!(cfg.led.endpoint, LedEndpointStyle::FlashControl);
    assert_eq!(cfg.led.timeout_ms, 500);
    assert_eq!(cfg.system.log_level.as_deref(), Some("debug"));
    assert!(cfg.system.headless);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("nope.toml");
    let err = load_config(Some(path.to_string_lossy().as_ref())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn malformed_file_reports_path() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_config(&dir, "[capture\nsource = 0\n");
    let err = load_config(Some(path.as_str())).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn shipped_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
    let (cfg, _) = load_config(Some(path)).expect("load shipped config");
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.detection.motion.min_area, 500.0);
}

#[test]
fn https_led_url_fails_validation() {
    let dir = TempDir::new().expect("create temp dir");
    let path = write_config(&dir, "[led]\nbase_url = \"https://192.168.1.50\"\n");
    let (cfg, _) = load_config(Some(path.as_str())).expect("parses");
    assert!(matches!(cfg.validate(), Err(Error::Config(_))));
}
