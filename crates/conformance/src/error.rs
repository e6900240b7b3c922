use donut_config::ConfigError;
use donut_core::Address;
use donut_rpc_client::RpcException;
use thiserror::Error;

/// Failures that stop a run before or outside the cases.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid funded account key: {0}")]
    Key(#[from] donut_cryptography::Error),

    #[error("wallet error: {0}")]
    Wallet(#[from] donut_wallets::Error),

    #[error("invalid built-in value: {0}")]
    Constant(#[from] donut_core::CoreError),

    #[error("{context}: {source}")]
    Rpc {
        context: &'static str,
        #[source]
        source: RpcException,
    },

    #[error("node refused to unlock account {0}")]
    UnlockRefused(Address),

    #[error("account {address} holds {balance} wei, below the required {required} wei, and no faucet is configured")]
    InsufficientFunds {
        address: Address,
        balance: u128,
        required: u128,
    },

    #[error("top-up of {address} from faucet failed: {reason}")]
    FundingFailed { address: Address, reason: String },

    #[error("gas price overflows: {minimum} x {multiplier}")]
    GasPriceOverflow { minimum: u128, multiplier: u64 },
}

impl HarnessError {
    pub(crate) fn rpc(context: &'static str) -> impl FnOnce(RpcException) -> Self {
        move |source| HarnessError::Rpc { context, source }
    }
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;
