// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// rpc_exception.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use thiserror::Error;

/// Error returned by the node or raised while talking to it.
///
/// `Display` is the node's message verbatim, so rejection reasons can be
/// matched by callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RpcException {
    /// JSON-RPC error code, or one of the client-side codes below
    pub code: i32,

    /// Error message
    pub message: String,
}

impl RpcException {
    /// Malformed JSON in the response
    pub const PARSE_ERROR: i32 = -32700;
    /// Transport failures and unexpected result shapes
    pub const INTERNAL_ERROR: i32 = -32603;
    /// A bounded wait ran out
    pub const TIMEOUT: i32 = -32000;

    /// Creates a new RPC exception
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }
}
