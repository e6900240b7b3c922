// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// transaction_api.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::models::{RpcReceipt, RpcTransaction};
use crate::{RpcClient, RpcException};
use donut_core::H256;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Waits for submitted transactions to be mined
pub struct TransactionApi {
    rpc_client: Arc<RpcClient>,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl TransactionApi {
    /// `timeout` bounds each receipt wait; `None` polls until the receipt appears.
    pub fn new(
        rpc_client: Arc<RpcClient>,
        poll_interval: Duration,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            rpc_client,
            poll_interval,
            timeout,
        }
    }

    /// Polls `eth_getTransactionReceipt` until a receipt appears or the
    /// timeout, if any, elapses. Errors from individual polls are returned as is.
    pub async fn wait_for_receipt(&self, hash: &H256) -> Result<RpcReceipt, RpcException> {
        let deadline = self.timeout.map(|timeout| (Instant::now() + timeout, timeout));
        loop {
            if let Some(receipt) = self.rpc_client.get_transaction_receipt(hash).await? {
                debug!(target: "donut::rpc", %hash, block = ?receipt.block_number, "receipt available");
                return Ok(receipt);
            }
            if let Some((deadline, timeout)) = deadline {
                if Instant::now() >= deadline {
                    return Err(RpcException::new(
                        RpcException::TIMEOUT,
                        format!(
                            "transaction {hash} was not mined within {}ms",
                            timeout.as_millis()
                        ),
                    ));
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Waits for the receipt, then fetches the mined transaction. A reverted
    /// receipt is an error.
    pub async fn wait_for_transaction(&self, hash: &H256) -> Result<RpcTransaction, RpcException> {
        let receipt = self.wait_for_receipt(hash).await?;
        if !receipt.succeeded() {
            return Err(RpcException::internal(format!(
                "transaction {hash} has been reverted"
            )));
        }
        self.rpc_client
            .get_transaction_by_hash(hash)
            .await?
            .ok_or_else(|| RpcException::internal(format!("transaction {hash} not found")))
    }
}
