// Copyright (C) 2021-2025 The donut-conformance contributors.
//
// contract_client.rs file belongs to the donut project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{RpcClient, RpcException};
use donut_core::Address;
use ethabi::{ParamType, Token};
use std::sync::Arc;

/// Encodes a call to `name` with parameter types `inputs`.
pub(crate) fn encode_call(
    name: &str,
    inputs: &[ParamType],
    args: &[Token],
) -> Result<Vec<u8>, RpcException> {
    if !Token::types_check(args, inputs) {
        return Err(RpcException::internal(format!(
            "{name}: arguments do not match {inputs:?}"
        )));
    }
    let mut data = ethabi::short_signature(name, inputs).to_vec();
    data.extend(ethabi::encode(args));
    Ok(data)
}

/// Read-only contract calls through `eth_call`
pub struct ContractClient {
    rpc_client: Arc<RpcClient>,
}

impl ContractClient {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }

    /// Calls `name` on `contract` and decodes the return data as `outputs`.
    pub async fn call_function(
        &self,
        contract: &Address,
        name: &str,
        inputs: &[ParamType],
        args: &[Token],
        outputs: &[ParamType],
    ) -> Result<Vec<Token>, RpcException> {
        let data = encode_call(name, inputs, args)?;
        let output = self.rpc_client.call(contract, &data).await?;
        ethabi::decode(outputs, &output)
            .map_err(|e| RpcException::internal(format!("{name}: {e}")))
    }

    /// Calls a function returning a single `address`.
    pub async fn call_address(
        &self,
        contract: &Address,
        name: &str,
        inputs: &[ParamType],
        args: &[Token],
    ) -> Result<Address, RpcException> {
        let tokens = self
            .call_function(contract, name, inputs, args, &[ParamType::Address])
            .await?;
        match tokens.first() {
            Some(Token::Address(address)) => Ok(Address::new(address.0)),
            other => Err(RpcException::internal(format!(
                "{name}: expected an address, got {other:?}"
            ))),
        }
    }

    /// Calls a function returning a single `uint256` that fits in 128 bits.
    pub async fn call_uint(
        &self,
        contract: &Address,
        name: &str,
        inputs: &[ParamType],
        args: &[Token],
    ) -> Result<u128, RpcException> {
        let tokens = self
            .call_function(contract, name, inputs, args, &[ParamType::Uint(256)])
            .await?;
        match tokens.first() {
            Some(Token::Uint(value)) if value.bits() <= 128 => Ok(value.low_u128()),
            Some(Token::Uint(_)) => Err(RpcException::internal(format!(
                "{name}: value does not fit in 128 bits"
            ))),
            other => Err(RpcException::internal(format!(
                "{name}: expected a uint256, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_dynamic_string_argument() {
        let data = encode_call(
            "getAddressForString",
            &[ParamType::String],
            &[Token::String("StableToken".to_string())],
        )
        .unwrap();
        assert_eq!(hex::encode(&data[..4]), "853db323");
        assert_eq!(data.len(), 4 + 3 * 32);
        assert_eq!(data[4 + 31], 0x20);
        assert_eq!(data[4 + 63], 11);
        assert_eq!(&data[4 + 64..4 + 75], b"StableToken");
        assert!(data[4 + 75..].iter().all(|b| *b == 0));
    }

    #[test]
    fn encodes_static_arguments_in_place() {
        let address: Address = "0x8c36775E95A5f7FEf6894Ba658628352Ac58605B".parse().unwrap();
        let data = encode_call(
            "transfer",
            &[ParamType::Address, ParamType::Uint(256)],
            &[
                Token::Address(ethabi::Address::from(*address.as_bytes())),
                Token::Uint(5u64.into()),
            ],
        )
        .unwrap();
        assert_eq!(hex::encode(&data[..4]), "a9059cbb");
        assert_eq!(&data[4 + 12..4 + 32], address.as_bytes());
        assert_eq!(data[4 + 63], 5);
        assert_eq!(data.len(), 4 + 64);
    }

    #[test]
    fn mismatched_arguments_are_an_error() {
        let err = encode_call("gasPriceMinimum", &[], &[Token::Bool(true)]).unwrap_err();
        assert!(err.to_string().contains("gasPriceMinimum"));
    }

    #[test]
    fn no_arguments_is_just_the_selector() {
        let data = encode_call("gasPriceMinimum", &[], &[]).unwrap();
        assert_eq!(hex::encode(data), "36945c2d");
    }
}
