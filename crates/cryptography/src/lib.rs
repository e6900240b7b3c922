//! Donut Cryptography
//!
//! Keccak-256 hashing and secp256k1 recoverable signatures, the two
//! primitives needed to sign transactions for the node and to derive
//! account addresses from private keys.

pub mod ecdsa;
pub mod hash;
pub mod key_pair;

pub use ecdsa::{recover_address, RecoverableSignature};
pub use hash::keccak256;
pub use key_pair::KeyPair;

use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cryptography errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}
