//! Tracing setup for hosts embedding the buffer engine.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "ztext.log";
const DEFAULT_FILTER: &str = "ztext=info";

/// Keeps the non-blocking writer alive; logs stop flushing once dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Default directory: `<cache>/.ztext/logs`, or the temp dir when no cache dir is known.
pub fn default_log_dir() -> PathBuf {
    crate::config::BufferConfig::settings_path()
        .and_then(|p| p.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| std::env::temp_dir().join("ztext").join("logs"))
}

/// Install a global subscriber writing to a daily rolling file under `log_dir`.
///
/// Returns `None` when the directory cannot be created or a global
/// subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> Option<LoggingGuard> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
