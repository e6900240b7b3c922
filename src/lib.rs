//! # Donut-RS: transaction-acceptance conformance suite
//!
//! Checks that a node accepts and rejects transactions exactly as the
//! eth-compatible encoding rules prescribe. Six boolean features (the
//! eth-compatible encoding, contract creation, fee currency, gateway fee,
//! gateway fee recipient, raw submission) span the test space; every
//! constructable combination is built, submitted and verified, followed by
//! two transactions without replay protection that the node must refuse.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use donut_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = HarnessConfig::default();
//!     config.apply_env();
//!
//!     let filter = FeatureFilter::default().pin(Feature::CompatMode, true);
//!     let report = Orchestrator::new(config, filter)?.run().await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - constants and the layered run configuration
//! - [`core`] - addresses, hashes, hex quantities, transaction requests
//! - [`crypto`] - keccak-256 and secp256k1 signing
//! - [`rpc_client`] - JSON-RPC client, registry lookups, receipt waiting
//! - [`wallets`] - eth-compatible and native transaction signing (RLP via `rlp`)
//! - [`conformance`] - case generation, submission, verification, orchestration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use donut_config as config;
pub use donut_conformance as conformance;
pub use donut_core as core;
pub use donut_cryptography as crypto;
pub use donut_rpc_client as rpc_client;
pub use donut_wallets as wallets;

/// Common imports for running the suite
pub mod prelude {
    pub use crate::config::{HarnessConfig, ReplayProtectionMode};
    pub use crate::conformance::{
        generate_cases, ExpectedOutcome, Feature, FeatureFilter, FeatureFlags, HarnessError,
        Orchestrator, RunReport, SubmissionResult, TestCase,
    };
    pub use crate::core::{Address, TransactionRequest, H256};
    pub use crate::crypto::KeyPair;
    pub use crate::rpc_client::{RpcClient, RpcException};
    pub use crate::wallets::{LocalWallet, SigningStrategy};
}

/// Donut library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
