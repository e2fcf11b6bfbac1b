// Tracing setup. Logs go to a file so stdout stays clean for tables and
// JSON output.

use anyhow::Context;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "hoopcast=info,warn";

const LOG_FILE: &str = "hoopcast.log";

/// Pick the log directory: `logs/` under `base_dir` if it can be created,
/// otherwise the platform's local data directory.
pub fn log_dir(base_dir: &Path) -> anyhow::Result<PathBuf> {
    let local = base_dir.join("logs");
    if std::fs::create_dir_all(&local).is_ok() {
        return Ok(local);
    }
    let dirs = ProjectDirs::from("", "", "hoopcast")
        .context("no writable log directory and no platform data directory")?;
    let fallback = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&fallback)
        .with_context(|| format!("failed to create {}", fallback.display()))?;
    Ok(fallback)
}

/// Install the global subscriber writing to `<log_dir>/hoopcast.log`.
/// Returns the log file path.
pub fn init_tracing(base_dir: &Path) -> anyhow::Result<PathBuf> {
    let dir = log_dir(base_dir)?;
    let path = dir.join(LOG_FILE);
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(path)
}
