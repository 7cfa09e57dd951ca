//! Tracing subscriber setup for the binary.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{level}': {source}")]
    InvalidFilter {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to create log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Initialize tracing from config.
///
/// `RUST_LOG` takes precedence over `logging.level`. With `logging.file`
/// set, output goes to that file without ANSI colors; otherwise to stderr.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&config.level).map_err(|source| LoggingError::InvalidFilter {
                level: config.level.clone(),
                source,
            })?
        }
    };

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::LogFile {
                path: PathBuf::from(path),
                source,
            })?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer.is_none().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
