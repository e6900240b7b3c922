// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// rpc_client.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::models::{RpcReceipt, RpcRequest, RpcResponse, RpcTransaction};
use crate::rpc_exception::RpcException;
use donut_core::{
    decode_hex, encode_hex, encode_quantity, parse_quantity, parse_quantity_u64, Address,
    TransactionRequest, H256,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Block tag for the latest mined block
const BLOCK_LATEST: &str = "latest";
/// Block tag that includes pending transactions
pub const BLOCK_PENDING: &str = "pending";

/// The RPC client to call node methods
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new RPC client
    pub fn new(url: Url) -> Result<Self, RpcException> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| RpcException::internal(format!("HTTP client error: {e}")))?;
        Ok(Self::with_client(http_client, url))
    }

    /// Creates a new RPC client from a URL string
    pub fn from_url(url: &str) -> Result<Self, RpcException> {
        let url = Url::parse(url)
            .map_err(|e| RpcException::internal(format!("Invalid RPC URL '{url}': {e}")))?;
        Self::new(url)
    }

    /// Creates a new RPC client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    /// The endpoint this client talks to
    pub fn url(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params)
    }

    fn as_rpc_response(content: &str, throw_on_error: bool) -> Result<RpcResponse, RpcException> {
        let response = RpcResponse::from_json(content).map_err(|e| {
            RpcException::new(RpcException::PARSE_ERROR, format!("Parse error: {e}"))
        })?;

        if let Some(ref error) = response.error {
            if throw_on_error {
                return Err(RpcException::new(error.code, error.message.clone()));
            }
        }

        Ok(response)
    }

    /// Sends an asynchronous RPC request
    pub async fn send_async(
        &self,
        request: RpcRequest,
        throw_on_error: bool,
    ) -> Result<RpcResponse, RpcException> {
        let request_json = request.to_json().to_string();
        trace!(target: "donut::rpc", method = %request.method, body = %request_json, "rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .header("Content-Type", "application/json")
            .body(request_json)
            .send()
            .await
            .map_err(|e| RpcException::internal(format!("HTTP error: {e}")))?;

        let content = response
            .text()
            .await
            .map_err(|e| RpcException::internal(format!("Failed to read response: {e}")))?;
        trace!(target: "donut::rpc", method = %request.method, body = %content, "rpc response");

        Self::as_rpc_response(&content, throw_on_error)
    }

    /// Sends an RPC request and returns the result, `Value::Null` when the
    /// node answered with a null result
    pub async fn rpc_send_async(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, RpcException> {
        let request = self.as_rpc_request(method, params);
        let response = self.send_async(request, true).await?;
        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn rpc_send_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<T>, RpcException> {
        let result = self.rpc_send_async(method, params).await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| RpcException::internal(format!("{method}: unexpected result: {e}")))
    }

    // Chain state

    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64, RpcException> {
        let result = self.rpc_send_async("eth_chainId", vec![]).await?;
        token_as_u64(&result, "eth_chainId")
    }

    /// `eth_blockNumber`
    pub async fn block_number(&self) -> Result<u64, RpcException> {
        let result = self.rpc_send_async("eth_blockNumber", vec![]).await?;
        token_as_u64(&result, "eth_blockNumber")
    }

    /// `eth_getTransactionCount` at the given block tag
    pub async fn get_transaction_count(
        &self,
        address: &Address,
        block: &str,
    ) -> Result<u64, RpcException> {
        let result = self
            .rpc_send_async(
                "eth_getTransactionCount",
                vec![json!(address.to_string()), json!(block)],
            )
            .await?;
        token_as_u64(&result, "eth_getTransactionCount")
    }

    /// `eth_getBalance` at the latest block
    pub async fn get_balance(&self, address: &Address) -> Result<u128, RpcException> {
        let result = self
            .rpc_send_async(
                "eth_getBalance",
                vec![json!(address.to_string()), json!(BLOCK_LATEST)],
            )
            .await?;
        token_as_quantity(&result, "eth_getBalance")
    }

    /// `eth_call` against the latest block
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, RpcException> {
        let result = self
            .rpc_send_async(
                "eth_call",
                vec![
                    json!({ "to": to.to_string(), "data": encode_hex(data) }),
                    json!(BLOCK_LATEST),
                ],
            )
            .await?;
        let value = token_as_str(&result, "eth_call")?;
        decode_hex(value).map_err(|e| RpcException::internal(format!("eth_call: {e}")))
    }

    // Transactions

    /// `eth_sendTransaction`; the node signs with an unlocked account
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<H256, RpcException> {
        let result = self
            .rpc_send_async("eth_sendTransaction", vec![tx.to_json()])
            .await?;
        token_as_hash(&result, "eth_sendTransaction")
    }

    /// `eth_sendRawTransaction` with an already signed encoding
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, RpcException> {
        let result = self
            .rpc_send_async("eth_sendRawTransaction", vec![json!(encode_hex(raw))])
            .await?;
        token_as_hash(&result, "eth_sendRawTransaction")
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending
    pub async fn get_transaction_receipt(
        &self,
        hash: &H256,
    ) -> Result<Option<RpcReceipt>, RpcException> {
        self.rpc_send_as("eth_getTransactionReceipt", vec![json!(hash.to_string())])
            .await
    }

    /// `eth_getTransactionByHash`; `None` when unknown to the node
    pub async fn get_transaction_by_hash(
        &self,
        hash: &H256,
    ) -> Result<Option<RpcTransaction>, RpcException> {
        self.rpc_send_as("eth_getTransactionByHash", vec![json!(hash.to_string())])
            .await
    }

    // Account lifecycle

    /// `personal_unlockAccount`
    pub async fn personal_unlock_account(
        &self,
        address: &Address,
        password: &str,
        duration_secs: u64,
    ) -> Result<bool, RpcException> {
        let result = self
            .rpc_send_async(
                "personal_unlockAccount",
                vec![json!(address.to_string()), json!(password), json!(duration_secs)],
            )
            .await?;
        token_as_bool(&result, "personal_unlockAccount")
    }

    /// `personal_lockAccount`
    pub async fn personal_lock_account(&self, address: &Address) -> Result<bool, RpcException> {
        let result = self
            .rpc_send_async("personal_lockAccount", vec![json!(address.to_string())])
            .await?;
        token_as_bool(&result, "personal_lockAccount")
    }

    // Validators

    /// `istanbul_getValidatorsBLSPublicKeys` for a block number
    pub async fn istanbul_get_validators_bls_public_keys(
        &self,
        block: u64,
    ) -> Result<Vec<String>, RpcException> {
        let method = "istanbul_getValidatorsBLSPublicKeys";
        let keys: Option<Vec<String>> = self
            .rpc_send_as(method, vec![json!(encode_quantity(block as u128))])
            .await?;
        keys.ok_or_else(|| RpcException::internal(format!("{method}: null result")))
    }
}

fn token_as_str<'a>(token: &'a Value, context: &str) -> Result<&'a str, RpcException> {
    token
        .as_str()
        .ok_or_else(|| RpcException::internal(format!("{context}: expected string token")))
}

fn token_as_quantity(token: &Value, context: &str) -> Result<u128, RpcException> {
    parse_quantity(token_as_str(token, context)?)
        .map_err(|e| RpcException::internal(format!("{context}: {e}")))
}

fn token_as_u64(token: &Value, context: &str) -> Result<u64, RpcException> {
    parse_quantity_u64(token_as_str(token, context)?)
        .map_err(|e| RpcException::internal(format!("{context}: {e}")))
}

fn token_as_hash(token: &Value, context: &str) -> Result<H256, RpcException> {
    token_as_str(token, context)?
        .parse()
        .map_err(|e| RpcException::internal(format!("{context}: {e}")))
}

fn token_as_bool(token: &Value, context: &str) -> Result<bool, RpcException> {
    token
        .as_bool()
        .ok_or_else(|| RpcException::internal(format!("{context}: expected boolean token")))
}
