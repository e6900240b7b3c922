//! Donut Configuration Module
//!
//! Constants shared by every crate of the conformance harness together with
//! [`HarnessConfig`], the layered run configuration. Layers are applied in
//! increasing precedence: built-in defaults, the development-accounts lookup,
//! a TOML file, environment variables and finally command-line overrides
//! (applied by the caller).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Endpoint used when `RPC_NODE_URL` is not set.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
/// Validator 0 of the local development network.
pub const DEFAULT_ACCOUNT_ADDRESS: &str = "0xd927E9e733a46f46e18528148D8b98E496545f66";
/// Private key of [`DEFAULT_ACCOUNT_ADDRESS`].
pub const DEFAULT_ACCOUNT_PRIVATE_KEY: &str =
    "5b278a5547041600410532c3bb4d4bcb7ed42b030763b55789918d56e7910d1b";

/// Environment variable overriding the endpoint URL.
pub const ENV_RPC_URL: &str = "RPC_NODE_URL";
/// Environment variable overriding the funded account address.
pub const ENV_ACCOUNT_ADDRESS: &str = "RPC_NODE_ADDRESS";
/// Environment variable overriding the funded account private key.
pub const ENV_ACCOUNT_PRIVATE_KEY: &str = "RPC_NODE_PRIVATE_KEY";
/// Environment variable pointing at a development accounts file.
pub const ENV_DEV_ACCOUNTS: &str = "DEV_ACCOUNTS_FILE";

/// Arbitrary destination of value transfers.
pub const TO_ADDRESS: &str = "0x8c36775E95A5f7FEf6894Ba658628352Ac58605B";
/// Arbitrary gateway fee recipient.
pub const GATEWAY_FEE_RECIPIENT_ADDRESS: &str = "0xc77538d1e30C0e4ec44B0DcaD97FD3dc63fcaCC4";
/// Core contracts registry, predeployed at genesis.
pub const REGISTRY_ADDRESS: &str = "0x000000000000000000000000000000000000ce10";

/// Registry identifier of the stable token used as fee currency.
pub const STABLE_TOKEN_REGISTRY_ID: &str = "StableToken";
/// Registry identifier of the gas price minimum contract.
pub const GAS_PRICE_MINIMUM_REGISTRY_ID: &str = "GasPriceMinimum";

/// Init code of a contract with a single constant; enough to exercise
/// contract creation without caring about what gets deployed.
pub const CONTRACT_BYTECODE: &str = "0x608060405260008055348015601357600080fd5b5060358060216000396000f3006080604052600080fd00a165627a7a72305820c7f3f7c299940bb1d9b122d25e8f288817e45bbdeaccdd2f6e8801677ed934e70029";

/// Gas limit for every generated transaction, plenty for both transfers and creations.
pub const GAS_LIMIT: u64 = 1_000_000;
/// Nominal value moved by transfers, in wei.
pub const TRANSFER_VALUE_WEI: u64 = 5;
/// Gateway fee attached when a case asks for one, in wei.
pub const GATEWAY_FEE_WEI: u64 = 0x25;

/// Error returned by the node when a compatible transaction carries native-only fields.
pub const INCOMPATIBLE_FIELDS_ERROR: &str =
    "ethCompatible is true, but non-eth-compatible fields are present";
/// Error returned by the node when a transaction lacks replay protection.
pub const NO_REPLAY_PROTECTION_ERROR: &str = "replay protection is required";

/// Compressed BLS12-377 G2 public key length in bytes.
pub const BLS_PUBLIC_KEY_SIZE: usize = 96;
/// Size of an account address in bytes.
pub const ADDRESS_SIZE: usize = 20;
/// Size of a hash or private key in bytes.
pub const HASH_SIZE: usize = 32;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid development accounts file {path}: {source}")]
    DevAccounts {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("development accounts file {0} lists no accounts")]
    NoDevAccounts(PathBuf),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which replay-protection checks a run performs alongside the matrix cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReplayProtectionMode {
    /// Matrix cases followed by the replay-protection checks.
    #[default]
    Run,
    /// Matrix cases only.
    Skip,
    /// Replay-protection checks only.
    Only,
}

impl ReplayProtectionMode {
    pub fn runs_matrix(self) -> bool {
        self != ReplayProtectionMode::Only
    }

    pub fn runs_replay_checks(self) -> bool {
        self != ReplayProtectionMode::Skip
    }
}

impl fmt::Display for ReplayProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayProtectionMode::Run => write!(f, "run"),
            ReplayProtectionMode::Skip => write!(f, "skip"),
            ReplayProtectionMode::Only => write!(f, "only"),
        }
    }
}

impl std::str::FromStr for ReplayProtectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" => Ok(ReplayProtectionMode::Run),
            "skip" => Ok(ReplayProtectionMode::Skip),
            "only" => Ok(ReplayProtectionMode::Only),
            _ => Err(format!("Unknown replay protection mode: {}", s)),
        }
    }
}

/// A funded development account as listed in the accounts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevAccount {
    pub address: String,
    pub private_key: String,
}

/// Loads the development accounts file (a JSON list of `{address, privateKey}`).
pub fn load_dev_accounts(path: &Path) -> Result<Vec<DevAccount>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::DevAccounts {
        path: path.to_path_buf(),
        source,
    })
}

/// Run configuration of the harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// JSON-RPC endpoint of the node under test
    pub url: String,
    /// Funded account; `None` falls back to the dev accounts file, then the built-in default
    pub address: Option<String>,
    /// Private key of the funded account, hex with or without `0x`
    pub private_key: Option<String>,
    /// Development accounts file consulted when no account is configured
    pub dev_accounts: Option<PathBuf>,
    /// Password passed to `personal_unlockAccount`
    pub unlock_password: String,
    /// Seconds the node keeps the account unlocked
    pub unlock_duration_secs: u64,
    /// Fixed gas price in wei; `None` reads the on-chain minimum
    pub gas_price: Option<u64>,
    /// Factor applied to the on-chain gas price minimum
    pub gas_price_multiplier: u64,
    /// Fee currency address; `None` resolves the stable token through the registry
    pub fee_currency: Option<String>,
    /// Pause before the setup talks to the node
    pub settle_delay_ms: u64,
    /// Interval between receipt polls
    pub receipt_poll_interval_ms: u64,
    /// Upper bound on waiting for one transaction to be mined; `None` waits
    /// until the suite timeout, if any, ends the run
    pub receipt_timeout_secs: Option<u64>,
    /// Upper bound on the whole run; `None` waits forever
    pub suite_timeout_secs: Option<u64>,
    /// Balance below which the account is topped up before the run
    pub min_balance_wei: u64,
    /// Amount sent by the faucet when topping up
    pub top_up_wei: u64,
    /// Node-unlocked account that funds the top-up
    pub faucet: Option<String>,
    /// Replay-protection checks selection
    pub replay_protection: ReplayProtectionMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            address: None,
            private_key: None,
            dev_accounts: None,
            unlock_password: String::new(),
            unlock_duration_secs: 100_000,
            gas_price: None,
            gas_price_multiplier: 5,
            fee_currency: None,
            settle_delay_ms: 2_000,
            receipt_poll_interval_ms: 250,
            receipt_timeout_secs: None,
            suite_timeout_secs: None,
            min_balance_wei: 0,
            top_up_wei: 1_000_000_000_000_000_000,
            faucet: None,
            replay_protection: ReplayProtectionMode::Run,
        }
    }
}

impl HarnessConfig {
    /// Loads a TOML configuration file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the process environment on top of the current values.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies environment-style overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_RPC_URL).filter(|v| !v.is_empty()) {
            debug!(target: "donut::config", %url, "endpoint taken from environment");
            self.url = url;
        }
        if let Some(address) = lookup(ENV_ACCOUNT_ADDRESS).filter(|v| !v.is_empty()) {
            self.address = Some(address);
        }
        if let Some(key) = lookup(ENV_ACCOUNT_PRIVATE_KEY).filter(|v| !v.is_empty()) {
            self.private_key = Some(key);
        }
        if let Some(path) = lookup(ENV_DEV_ACCOUNTS).filter(|v| !v.is_empty()) {
            self.dev_accounts = Some(PathBuf::from(path));
        }
    }

    /// Resolves the funded account as `(address, private_key)`.
    ///
    /// An explicitly configured pair wins; otherwise the first entry of the
    /// development accounts file is used, and without one the built-in
    /// validator account.
    pub fn funded_account(&self) -> Result<(String, String)> {
        if let (Some(address), Some(key)) = (&self.address, &self.private_key) {
            return Ok((address.clone(), key.clone()));
        }

        if let Some(path) = &self.dev_accounts {
            let accounts = load_dev_accounts(path)?;
            let first = accounts
                .into_iter()
                .next()
                .ok_or_else(|| ConfigError::NoDevAccounts(path.clone()))?;
            debug!(target: "donut::config", address = %first.address, "funded account taken from dev accounts");
            return Ok((
                self.address.clone().unwrap_or(first.address),
                self.private_key.clone().unwrap_or(first.private_key),
            ));
        }

        Ok((
            self.address
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCOUNT_ADDRESS.to_string()),
            self.private_key
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCOUNT_PRIVATE_KEY.to_string()),
        ))
    }

    /// Checks the shape of every configured value.
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "url",
                reason: format!("expected an http(s) endpoint, got '{}'", self.url),
            });
        }

        let (address, key) = self.funded_account()?;
        check_hex_len("address", &address, ADDRESS_SIZE)?;
        check_hex_len("private_key", &key, HASH_SIZE)?;

        if let Some(fee_currency) = &self.fee_currency {
            check_hex_len("fee_currency", fee_currency, ADDRESS_SIZE)?;
        }
        if let Some(faucet) = &self.faucet {
            check_hex_len("faucet", faucet, ADDRESS_SIZE)?;
        }
        if self.gas_price_multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gas_price_multiplier",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "receipt_poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn check_hex_len(field: &'static str, value: &str, expected: usize) -> Result<()> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: format!("'{}' is not hex: {}", value, e),
    })?;
    if bytes.len() != expected {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected {} bytes, got {}", expected, bytes.len()),
        });
    }
    Ok(())
}
