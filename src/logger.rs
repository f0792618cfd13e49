use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "global-explorer.log";

lazy_static::lazy_static! {
    static ref GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);
}

/// Directory the daily log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("global-explorer").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the file logger. The terminal belongs to the UI, so nothing goes to stdout.
pub fn init() {
    init_in(&log_dir());
}

pub fn init_in(dir: &Path) {
    let Ok(mut guard) = GUARD.lock() else {
        return;
    };
    if guard.is_some() {
        return;
    }

    // The appender creates its directory; fall back to the temp dir when that fails.
    let fallback = std::env::temp_dir().join("global-explorer").join("logs");
    let (file_appender, used_dir, dir_error) = match daily_appender(dir) {
        Ok(appender) => (appender, dir.to_path_buf(), None),
        Err(e) => match daily_appender(&fallback) {
            Ok(appender) => (appender, fallback, Some(e)),
            Err(_) => return,
        },
    };
    let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    // Another subscriber may already be installed (tests); keep the guard either way.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    *guard = Some(worker_guard);
    if let Some(e) = dir_error {
        tracing::warn!("Failed to create log directory {}: {}", dir.display(), e);
    }
    tracing::info!("Log directory: {}", used_dir.display());
}

fn daily_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
}
