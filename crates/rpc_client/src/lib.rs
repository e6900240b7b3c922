// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// lib.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Donut RPC Client Library
//!
//! A JSON-RPC client for Celo nodes. Besides the standard `eth_*` methods it
//! speaks the `personal_*` account lifecycle methods, the `istanbul_*`
//! validator queries, and resolves core contracts through the on-chain
//! registry.

pub mod models;
mod contract_client;
mod registry_api;
mod rpc_client;
mod rpc_exception;
mod transaction_api;

pub use contract_client::ContractClient;
pub use ethabi::{ParamType, Token};
pub use registry_api::RegistryApi;
pub use rpc_client::{RpcClient, BLOCK_PENDING};
pub use rpc_exception::RpcException;
pub use transaction_api::TransactionApi;

pub use models::{RpcReceipt, RpcRequest, RpcResponse, RpcResponseError, RpcTransaction};
