use clap::Parser;
use log::{error, info, warn};

mod panic_handler;

use crate::{
    capture::Camera,
    cli::Cli,
    config::{self, ConfigSource},
    error::Result,
    system::monitoring::Monitor,
    utils::logger,
};

const LOG_LEVEL: &str = "info";

/// Entry point; returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();

    let (mut config, source) = match config::load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("[run] {}", e);
            return 1;
        }
    };
    cli.apply(&mut config);

    let log_level = config
        .system
        .log_level
        .clone()
        .unwrap_or_else(|| LOG_LEVEL.to_string());
    // keep the handle alive, dropping it stops the file writer
    let _logger = match logger::init_logger(&log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("[run] init logger failed: {}", e);
            return 1;
        }
    };

    panic_handler::setup_panic_handler();
    info!("=== cam-sentry started ===");
    info!("debug mode: {}", cfg!(debug_assertions));
    match &source {
        ConfigSource::File(_) => info!("[run] load config from {}", source),
        ConfigSource::Defaults => warn!("[run] using {}", source),
    }
    info!("[run] effective config: {:?}", config);

    match start(config, cli.max_frames) {
        Ok(()) => {
            info!("=== cam-sentry stopped ===");
            0
        }
        Err(e) => {
            error!("[run] {}", e);
            1
        }
    }
}

fn start(config: config::Config, max_frames: Option<u64>) -> Result<()> {
    // covers the file and the command-line overrides together
    config.validate()?;

    let camera = Camera::open(&config.capture)?;
    info!("[✓] capture opened: {}", camera.source());
    if config.detection.background.countdown_secs == 0 {
        info!("Point the camera at a static background for a moment.");
    }
    if !config.system.headless {
        info!("Press 'q' in the video window to exit, 'l' to toggle the LED.");
    }

    let summary = Monitor::new(config, camera, max_frames)?.run()?;
    info!(
        "[✓] processed {} frames, {} with detections",
        summary.frames, summary.frames_with_detections
    );
    Ok(())
}
