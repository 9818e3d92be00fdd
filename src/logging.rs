use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LOG_FILE_NAME: &str = "tag-search.log";

pub fn default_log_dir() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("manga-tag-search")
        .join("logs")
}

/// Installs a file-backed subscriber. Hosts that already installed their own
/// keep it; only the first call in a process wires up the file writer.
pub fn init_logging(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    static GUARD: OnceCell<WorkerGuard> = OnceCell::new();
    let log_dir = dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;
    if GUARD.get().is_some() {
        return Ok(log_dir);
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = GUARD.set(guard);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .with_ansi(false)
        .with_writer(non_blocking);
    if let Err(e) = subscriber.try_init() {
        eprintln!("Failed to init tracing subscriber: {e}");
    }

    debug!(log_dir = %log_dir.display(), "logging initialized");
    Ok(log_dir)
}
