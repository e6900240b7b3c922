//! Configuration layering tests.

use clap::Parser;
use donut_cli::{resolve_config_with, CliArgs};
use donut_config::{ConfigError, DEFAULT_ACCOUNT_ADDRESS};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_without_any_layer() {
    let args = CliArgs::try_parse_from(["donut-cli"]).unwrap();
    let config = resolve_config_with(&args, env(&[])).unwrap();
    assert_eq!(config.url, "http://localhost:8545");
    let (address, _) = config.funded_account().unwrap();
    assert_eq!(address, DEFAULT_ACCOUNT_ADDRESS);
}

#[test]
fn command_line_beats_environment_beats_file() {
    let file = temp_file("url = \"http://from-file:8545\"\ngas_price_multiplier = 3\n");
    let path = file.path().to_str().unwrap();

    let args = CliArgs::try_parse_from(["donut-cli", "--config", path]).unwrap();
    let config = resolve_config_with(&args, env(&[])).unwrap();
    assert_eq!(config.url, "http://from-file:8545");
    assert_eq!(config.gas_price_multiplier, 3);

    let config = resolve_config_with(&args, env(&[("RPC_NODE_URL", "http://from-env:8545")])).unwrap();
    assert_eq!(config.url, "http://from-env:8545");

    let args = CliArgs::try_parse_from(["donut-cli", "--config", path, "--url", "http://from-cli:8545"])
        .unwrap();
    let config = resolve_config_with(&args, env(&[("RPC_NODE_URL", "http://from-env:8545")])).unwrap();
    assert_eq!(config.url, "http://from-cli:8545");
    assert_eq!(config.gas_price_multiplier, 3);
}

#[test]
fn dev_accounts_fill_the_funded_account() {
    let accounts = temp_file(
        r#"[{"address": "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f", "privateKey": "4646464646464646464646464646464646464646464646464646464646464646"}]"#,
    );
    let path = accounts.path().to_str().unwrap();

    let args = CliArgs::try_parse_from(["donut-cli"]).unwrap();
    let config = resolve_config_with(&args, env(&[("DEV_ACCOUNTS_FILE", path)])).unwrap();
    let (address, key) = config.funded_account().unwrap();
    assert_eq!(address, "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f");
    assert_eq!(key, "4646464646464646464646464646464646464646464646464646464646464646");
}

#[test]
fn invalid_values_are_rejected() {
    let args = CliArgs::try_parse_from(["donut-cli", "--url", "ws://node:8546"]).unwrap();
    assert!(matches!(
        resolve_config_with(&args, env(&[])),
        Err(ConfigError::InvalidValue { field: "url", .. })
    ));

    let args = CliArgs::try_parse_from(["donut-cli", "--fee-currency-address", "0x1234"]).unwrap();
    assert!(matches!(
        resolve_config_with(&args, env(&[])),
        Err(ConfigError::InvalidValue { field: "fee_currency", .. })
    ));
}

#[test]
fn missing_config_file_is_an_error() {
    let args = CliArgs::try_parse_from(["donut-cli", "--config", "/nonexistent/donut.toml"]).unwrap();
    assert!(matches!(
        resolve_config_with(&args, env(&[])),
        Err(ConfigError::Io { .. })
    ));
}
