//! Donut CLI Library
//!
//! Argument parsing, configuration resolution and log setup for the
//! `donut-cli` binary.

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;
pub mod config;
pub mod logging;

pub use args::{CliArgs, LogFormat, LogLevel};
pub use config::{resolve_config, resolve_config_with};
pub use logging::init_tracing;
