use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,metime=debug";

/// Initialize structured logging to `~/.local/state/metime/metime.log`.
///
/// `RUST_LOG` wins over `config_filter`, which wins over the default
/// filter. If the state directory cannot be used, logs go to stderr.
/// Returns the log file path when logging to a file.
pub fn init_logging(config_filter: Option<&str>) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match open_log_file() {
        Ok((path, file)) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
            tracing::info!("metime logging initialized at {}", path.display());
            Some(path)
        }
        Err(err) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!("log file unavailable, logging to stderr: {err:#}");
            None
        }
    }
}

fn open_log_file() -> Result<(PathBuf, fs::File)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("metime")?;
    let log_dir = xdg_dirs.get_state_home();

    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("metime.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;
    Ok((log_file_path, file))
}
