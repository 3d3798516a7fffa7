use flexi_logger::{DeferredNow, Logger, LoggerHandle};
#[cfg(not(debug_assertions))]
use flexi_logger::{Cleanup, Criterion, FileSpec, Naming};
use log::Record;

use crate::error::Result;

fn line_format(
    writer: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        writer,
        "[{}][{}][{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.line().unwrap_or(0),
        &record.args()
    )
}

/// Debug builds log to stdout, release builds to rotating files under `logs/`.
/// The returned handle must be kept alive for the lifetime of the program.
pub fn init_logger(log_level: &str) -> Result<LoggerHandle> {
    #[cfg(debug_assertions)]
    let handle = Logger::try_with_str(log_level)?
        .log_to_stdout()
        .format(line_format)
        .start()?;

    #[cfg(not(debug_assertions))]
    let handle = Logger::try_with_str(log_level)?
        .log_to_file(FileSpec::default().directory("logs").basename("cam-sentry"))
        .rotate(
            Criterion::Size(3_000_000),
            Naming::Numbers,
            Cleanup::KeepLogFiles(15),
        )
        .format(line_format)
        .start()?;

    Ok(handle)
}
