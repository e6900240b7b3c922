//! Donut Wallets Library
//!
//! Client-side signing for raw transaction submission. Two encodings exist:
//!
//! - [`Account`] signs the eth-compatible encoding (EIP-155, nine fields),
//!   which cannot carry fee currency or gateway fee fields.
//! - [`LocalWallet`] holds private keys by address and signs the node's
//!   native encoding, which always carries those three fields, empty when
//!   unset.
//!
//! [`SigningStrategy`] picks one of them from the compatibility mode.

pub mod account;
mod encoding;
pub mod local_wallet;
pub mod signed_transaction;
pub mod signing_strategy;

pub use account::Account;
pub use local_wallet::LocalWallet;
pub use signed_transaction::SignedTransaction;
pub use signing_strategy::SigningStrategy;

use donut_core::Address;
use thiserror::Error;

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wallet-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Account not found: {0}")]
    AccountNotFound(Address),

    #[error("transaction has celo-only fields")]
    IncompatibleFields,

    #[error(transparent)]
    Cryptography(#[from] donut_cryptography::Error),
}
