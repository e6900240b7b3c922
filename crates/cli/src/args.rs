use clap::{ArgAction, Parser, ValueEnum};
use donut_config::{HarnessConfig, ReplayProtectionMode};
use donut_conformance::{Feature, FeatureFilter};
use std::path::PathBuf;

/// Command-line arguments for the Donut CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "donut-cli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Donut CLI - conformance suite for a node's transaction-acceptance rules",
    long_about = "Generates every combination of the transaction features (eth-compatible encoding, contract creation, fee currency, gateway fee, gateway fee recipient, raw submission), submits each one to the node and checks that it is accepted or rejected as the acceptance rules prescribe."
)]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "DONUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the node
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Funded account address
    #[arg(long = "address", value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Private key of the funded account
    #[arg(long = "private-key", value_name = "HEX")]
    pub private_key: Option<String>,

    /// Password used to unlock the account on the node
    #[arg(long = "unlock-password", value_name = "PASSWORD")]
    pub unlock_password: Option<String>,

    /// Fixed gas price in wei instead of the on-chain minimum
    #[arg(long = "gas-price", value_name = "WEI")]
    pub gas_price: Option<u64>,

    /// Fee currency address instead of the registry's stable token
    #[arg(long = "fee-currency-address", value_name = "ADDRESS")]
    pub fee_currency_address: Option<String>,

    /// Node-unlocked account that tops up the funded account
    #[arg(long = "faucet", value_name = "ADDRESS")]
    pub faucet: Option<String>,

    /// Upper bound on the whole run
    #[arg(long = "suite-timeout", value_name = "SECONDS")]
    pub suite_timeout: Option<u64>,

    /// Only cases with this eth-compatible setting
    #[arg(long = "compat-mode", value_name = "BOOL", action = ArgAction::Set)]
    pub compat_mode: Option<bool>,

    /// Only cases with this contract-creation setting
    #[arg(long = "contract-creation", value_name = "BOOL", action = ArgAction::Set)]
    pub contract_creation: Option<bool>,

    /// Only cases with this fee-currency setting
    #[arg(long = "fee-currency", value_name = "BOOL", action = ArgAction::Set)]
    pub fee_currency: Option<bool>,

    /// Only cases with this gateway-fee setting
    #[arg(long = "gateway-fee", value_name = "BOOL", action = ArgAction::Set)]
    pub gateway_fee: Option<bool>,

    /// Only cases with this gateway-fee-recipient setting
    #[arg(long = "gateway-fee-recipient", value_name = "BOOL", action = ArgAction::Set)]
    pub gateway_fee_recipient: Option<bool>,

    /// Only cases with this raw-submission setting
    #[arg(long = "raw-submission", value_name = "BOOL", action = ArgAction::Set)]
    pub raw_submission: Option<bool>,

    /// Replay-protection checks: run, skip or only
    #[arg(long = "replay-protection", value_name = "MODE")]
    pub replay_protection: Option<ReplayProtectionMode>,

    /// Print the planned cases and exit without contacting the node
    #[arg(long = "list")]
    pub list: bool,

    /// Write the run report as JSON
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Check the validator BLS public keys at BLOCK (latest when omitted) instead of running the suite
    #[arg(long = "check-bls", value_name = "BLOCK", num_args = 0..=1)]
    pub check_bls: Option<Option<u64>>,

    /// Log level used when RUST_LOG is not set
    #[arg(long = "verbose", value_enum, default_value = "info")]
    pub verbose: LogLevel,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl CliArgs {
    /// The case filter built from the per-feature flags.
    pub fn filter(&self) -> FeatureFilter {
        FeatureFilter::default()
            .set(Feature::CompatMode, self.compat_mode)
            .set(Feature::ContractCreation, self.contract_creation)
            .set(Feature::FeeCurrency, self.fee_currency)
            .set(Feature::GatewayFee, self.gateway_fee)
            .set(Feature::GatewayFeeRecipient, self.gateway_fee_recipient)
            .set(Feature::RawSubmission, self.raw_submission)
    }

    /// Applies the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut HarnessConfig) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(address) = &self.address {
            config.address = Some(address.clone());
        }
        if let Some(key) = &self.private_key {
            config.private_key = Some(key.clone());
        }
        if let Some(password) = &self.unlock_password {
            config.unlock_password = password.clone();
        }
        if let Some(gas_price) = self.gas_price {
            config.gas_price = Some(gas_price);
        }
        if let Some(fee_currency) = &self.fee_currency_address {
            config.fee_currency = Some(fee_currency.clone());
        }
        if let Some(faucet) = &self.faucet {
            config.faucet = Some(faucet.clone());
        }
        if let Some(secs) = self.suite_timeout {
            config.suite_timeout_secs = Some(secs);
        }
        if let Some(mode) = self.replay_protection {
            config.replay_protection = mode;
        }
    }
}
