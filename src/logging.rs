use env_logger::{Builder, Env, Target};
use fs_err::{File, OpenOptions};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Environment variable from which the log filter is read
const LOG_ENV_VAR: &str = "HAZARDSNAKE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a global logger that appends to the file at `path`.  The terminal
/// belongs to the interface while the program runs, so log messages never go
/// to stderr.
pub(crate) fn init(path: &Path) -> Result<(), LogInitError> {
    let file = open_log_file(path).map_err(LogInitError::Open)?;
    builder(Target::Pipe(Box::new(file))).try_init()?;
    log::info!(
        "{} {} starting up",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn builder(target: Target) -> Builder {
    let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV_VAR, DEFAULT_FILTER));
    builder.target(target).format_timestamp_millis();
    builder
}

#[derive(Debug, Error)]
pub(crate) enum LogInitError {
    #[error("failed to open log file")]
    Open(#[source] io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
