// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// rpc_receipt.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::common::{opt_quantity, opt_quantity_u64};
use donut_core::{Address, H256};
use serde::Deserialize;

/// A receipt as returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: H256,
    #[serde(default)]
    pub block_hash: Option<H256>,
    #[serde(default, deserialize_with = "opt_quantity_u64")]
    pub block_number: Option<u64>,
    #[serde(default, deserialize_with = "opt_quantity")]
    pub gas_used: Option<u128>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// `0x1` on success, `0x0` when execution reverted
    #[serde(default, deserialize_with = "opt_quantity_u64")]
    pub status: Option<u64>,
}

impl RpcReceipt {
    /// Receipts without a status field are treated as successful.
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == 1)
    }
}
