//! Donut Core
//!
//! Primitive types shared across the harness: 20-byte account
//! [`Address`]es, 32-byte [`H256`] hashes, JSON-RPC hex helpers and the
//! [`TransactionRequest`] every case is built into.

pub mod address;
mod fixed_bytes;
pub mod hash;
pub mod hex_encoding;
pub mod transaction_request;

pub use address::Address;
pub use hash::H256;
pub use hex_encoding::{decode_hex, encode_hex, encode_quantity, parse_quantity, parse_quantity_u64};
pub use transaction_request::TransactionRequest;

use thiserror::Error;

/// Errors raised while decoding primitive values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid hex '{value}': {reason}")]
    InvalidHex { value: String, reason: String },

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
}

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
