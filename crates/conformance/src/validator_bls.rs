//! Shape check of the validators' BLS public keys.

use crate::error::{HarnessError, Result};
use crate::verifier::{Assertion, AssertionSet};
use donut_config::BLS_PUBLIC_KEY_SIZE;
use donut_core::decode_hex;
use donut_rpc_client::RpcClient;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlsKeyReport {
    pub block: u64,
    pub keys: Vec<String>,
    pub assertions: AssertionSet,
}

impl BlsKeyReport {
    pub fn passed(&self) -> bool {
        self.assertions.passed()
    }
}

/// Fetches the validator set's BLS keys at `block` (latest when `None`) and
/// checks there is at least one key and each is a compressed G2 point.
pub async fn check_validator_bls_keys(client: &RpcClient, block: Option<u64>) -> Result<BlsKeyReport> {
    let block = match block {
        Some(block) => block,
        None => client
            .block_number()
            .await
            .map_err(HarnessError::rpc("reading block number"))?,
    };
    let keys = client
        .istanbul_get_validators_bls_public_keys(block)
        .await
        .map_err(HarnessError::rpc("reading validator BLS keys"))?;

    let mut assertions = AssertionSet::default();
    assertions.push(Assertion::check(
        "returns at least one validator key",
        !keys.is_empty(),
        format!("no keys at block {block}"),
    ));
    for (index, key) in keys.iter().enumerate() {
        let description = format!("key {index} is {BLS_PUBLIC_KEY_SIZE} bytes");
        let assertion = match decode_hex(key) {
            Ok(bytes) => Assertion::check(
                description,
                bytes.len() == BLS_PUBLIC_KEY_SIZE,
                format!("got {} bytes", bytes.len()),
            ),
            Err(err) => Assertion::fail(description, err.to_string()),
        };
        assertions.push(assertion);
    }
    info!(target: "donut::bls", block, keys = keys.len(), passed = assertions.passed(), "validator BLS keys checked");

    Ok(BlsKeyReport {
        block,
        keys,
        assertions,
    })
}
