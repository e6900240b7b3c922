// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// rpc_transaction.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::{data, opt_quantity, opt_quantity_u64, quantity, quantity_u64};
use donut_core::{Address, H256};
use serde::Deserialize;

/// A transaction as returned by `eth_getTransactionByHash`.
///
/// Besides the standard fields the node reports the three native-only fields
/// and whether the transaction was decoded from the eth-compatible encoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: H256,
    pub from: Address,
    #[serde(deserialize_with = "quantity_u64")]
    pub nonce: u64,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(deserialize_with = "quantity")]
    pub value: u128,
    #[serde(deserialize_with = "quantity_u64")]
    pub gas: u64,
    #[serde(deserialize_with = "quantity")]
    pub gas_price: u128,
    #[serde(default, deserialize_with = "data")]
    pub input: Vec<u8>,
    #[serde(default)]
    pub block_hash: Option<H256>,
    #[serde(default, deserialize_with = "opt_quantity_u64")]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub fee_currency: Option<Address>,
    #[serde(default, deserialize_with = "opt_quantity")]
    pub gateway_fee: Option<u128>,
    #[serde(default)]
    pub gateway_fee_recipient: Option<Address>,
    /// Absent on nodes that predate the eth-compatible encoding
    #[serde(default)]
    pub eth_compatible: Option<bool>,
}

impl RpcTransaction {
    /// Whether the transaction has been included in a block.
    pub fn is_mined(&self) -> bool {
        self.block_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_node_transaction() {
        let tx: RpcTransaction = serde_json::from_value(json!({
            "blockHash": "0x6a5e4d8f2a1a21b8d0a5b0e2c6b6e1f3a1f0f1e2d3c4b5a69788796a5b4c3d2e",
            "blockNumber": "0x1b4",
            "from": "0xd927e9e733a46f46e18528148d8b98e496545f66",
            "gas": "0xf4240",
            "gasPrice": "0x2540be400",
            "feeCurrency": null,
            "gatewayFeeRecipient": null,
            "gatewayFee": "0x0",
            "hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "input": "0x",
            "nonce": "0x2a",
            "to": "0x8c36775e95a5f7fef6894ba658628352ac58605b",
            "transactionIndex": "0x0",
            "value": "0x5",
            "v": "0x8c7",
            "r": "0x1",
            "s": "0x2",
            "ethCompatible": true
        }))
        .unwrap();

        assert!(tx.is_mined());
        assert_eq!(tx.eth_compatible, Some(true));
        assert_eq!(tx.nonce, 42);
        assert_eq!(tx.block_number, Some(0x1b4));
        assert_eq!(tx.gas, 1_000_000);
        assert_eq!(tx.value, 5);
        assert_eq!(tx.gateway_fee, Some(0));
        assert!(tx.fee_currency.is_none());
        assert!(tx.input.is_empty());
    }

    #[test]
    fn missing_compat_flag_stays_absent() {
        let tx: RpcTransaction = serde_json::from_value(json!({
            "hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "from": "0xd927e9e733a46f46e18528148d8b98e496545f66",
            "nonce": "0x0",
            "to": null,
            "value": "0x0",
            "gas": "0x5208",
            "gasPrice": "0x1",
            "input": "0x6080",
            "blockHash": null
        }))
        .unwrap();
        assert!(!tx.is_mined());
        assert_eq!(tx.eth_compatible, None);
        assert_eq!(tx.input, vec![0x60, 0x80]);
    }
}
