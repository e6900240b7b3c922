//! Subscriber installation.

use donut_cli::{init_tracing, LogFormat, LogLevel};

#[test]
fn second_initialisation_is_reported() {
    assert!(init_tracing(LogLevel::Info, LogFormat::Text).is_ok());
    let err = init_tracing(LogLevel::Debug, LogFormat::Json).unwrap_err();
    assert!(!err.to_string().is_empty());
}
