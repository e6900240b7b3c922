// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// rpc_response.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error object of a failed JSON-RPC call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponseError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC 2.0 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Value,

    #[serde(rename = "jsonrpc", default)]
    pub json_rpc: String,

    /// `None` both for a missing member and for an explicit `null`
    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<RpcResponseError>,

    /// The body as received
    #[serde(skip)]
    pub raw_response: Option<String>,
}

impl RpcResponse {
    /// Parses a response body
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut response: RpcResponse = serde_json::from_str(content)?;
        response.raw_response = Some(content.to_string());
        Ok(response)
    }
}
