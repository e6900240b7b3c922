// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// registry_api.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{ContractClient, RpcClient, RpcException};
use donut_config::{GAS_PRICE_MINIMUM_REGISTRY_ID, REGISTRY_ADDRESS, STABLE_TOKEN_REGISTRY_ID};
use donut_core::Address;
use ethabi::{ParamType, Token};
use std::sync::Arc;
use tracing::debug;

/// Core contract lookups through the on-chain registry
pub struct RegistryApi {
    contract_client: ContractClient,
    registry: Address,
}

impl RegistryApi {
    /// Uses the registry at its well-known address.
    pub fn new(rpc_client: Arc<RpcClient>) -> Result<Self, RpcException> {
        let registry = REGISTRY_ADDRESS
            .parse()
            .map_err(|e| RpcException::internal(format!("registry address: {e}")))?;
        Ok(Self::with_registry(rpc_client, registry))
    }

    pub fn with_registry(rpc_client: Arc<RpcClient>, registry: Address) -> Self {
        Self {
            contract_client: ContractClient::new(rpc_client),
            registry,
        }
    }

    /// Resolves a registry identifier; an unregistered name is an error.
    pub async fn get_address_for_string(&self, identifier: &str) -> Result<Address, RpcException> {
        let address = self
            .contract_client
            .call_address(
                &self.registry,
                "getAddressForString",
                &[ParamType::String],
                &[Token::String(identifier.to_string())],
            )
            .await?;
        if address.is_zero() {
            return Err(RpcException::internal(format!(
                "{identifier} is not registered"
            )));
        }
        debug!(target: "donut::rpc", %identifier, %address, "resolved registry entry");
        Ok(address)
    }

    /// Address of the StableToken contract, the fee currency used for tests.
    pub async fn stable_token(&self) -> Result<Address, RpcException> {
        self.get_address_for_string(STABLE_TOKEN_REGISTRY_ID).await
    }

    /// Current gas price minimum in the native currency.
    pub async fn gas_price_minimum(&self) -> Result<u128, RpcException> {
        let contract = self
            .get_address_for_string(GAS_PRICE_MINIMUM_REGISTRY_ID)
            .await?;
        self.contract_client
            .call_uint(&contract, "gasPriceMinimum", &[], &[])
            .await
    }
}
