//! File logging for the session.
//!
//! Logs go to rotating files under the log directory and never to the
//! terminal, which belongs to the conversation with the user.

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "ttrack";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start file logging at `level` in `log_dir`.
///
/// Returns `None` when the level is `off`. The handle must be kept alive
/// for the whole session so buffered lines get flushed.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<Option<LoggerHandle>> {
    if level == "off" {
        return Ok(None);
    }

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level `{}`", level))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_level_starts_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        assert!(init_logging("off", &log_dir).unwrap().is_none());
        assert!(!log_dir.exists());
    }
}
