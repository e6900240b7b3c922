//! Log output of the binary.

use crate::args::{LogFormat, LogLevel};
use std::error::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber writing to stderr. `RUST_LOG` takes
/// precedence over `level`. Fails when a subscriber is already installed.
pub fn init_tracing(
    level: LogLevel,
    format: LogFormat,
) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let level = tracing::Level::from(level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    match format {
        LogFormat::Text => fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .try_init(),
    }
}
