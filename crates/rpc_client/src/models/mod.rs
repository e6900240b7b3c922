// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// mod.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire models for requests, responses and the node's transaction objects.

mod common;
mod rpc_receipt;
mod rpc_request;
mod rpc_response;
mod rpc_transaction;

pub use rpc_receipt::RpcReceipt;
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcResponse, RpcResponseError};
pub use rpc_transaction::RpcTransaction;
