//! Tracing setup for the terminal client.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Setup logging to a session log file, or to stderr when asked.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run.
pub fn setup_logging(to_stderr: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if to_stderr {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
        return Ok(None);
    }

    let session = format!("session_{}", unix_seconds());
    let session_log_dir = log_directory().join(&session);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "battle.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // Battle output owns the terminal; logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging initialized: session={}", session);
    tracing::info!("Log file: {}/battle.log", session_log_dir.display());

    Ok(Some(guard))
}

/// Platform cache directory for logs, or the temp dir when there is none.
pub fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "chicago")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("chicago").join("logs"))
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
