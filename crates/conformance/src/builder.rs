//! Turns a case into a transaction request.

use crate::feature_matrix::TestCase;
use donut_config::{
    CONTRACT_BYTECODE, GAS_LIMIT, GATEWAY_FEE_RECIPIENT_ADDRESS, GATEWAY_FEE_WEI, TO_ADDRESS,
    TRANSFER_VALUE_WEI,
};
use donut_core::{decode_hex, Address, CoreResult, TransactionRequest};
use serde::Serialize;

/// Chain values read once per run, plus the sender's nonce which is
/// replaced before every case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainContext {
    pub chain_id: u64,
    pub gas_price: u128,
    pub sender: Address,
    pub nonce: u64,
    /// Fee currency attached by cases that use one
    pub fee_currency: Address,
}

impl ChainContext {
    /// A copy carrying a freshly fetched nonce.
    pub fn with_nonce(&self, nonce: u64) -> Self {
        Self {
            nonce,
            ..self.clone()
        }
    }
}

/// Fixed payload values of generated transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub to: Address,
    pub value: u128,
    pub bytecode: Vec<u8>,
    pub gateway_fee: u128,
    pub gateway_fee_recipient: Address,
}

impl Payload {
    pub fn standard() -> CoreResult<Self> {
        Ok(Self {
            to: TO_ADDRESS.parse()?,
            value: TRANSFER_VALUE_WEI as u128,
            bytecode: decode_hex(CONTRACT_BYTECODE)?,
            gateway_fee: GATEWAY_FEE_WEI as u128,
            gateway_fee_recipient: GATEWAY_FEE_RECIPIENT_ADDRESS.parse()?,
        })
    }
}

/// Builds the request for `case`. Nothing is validated: contradictory
/// combinations are meant to reach the node.
pub fn build(case: &TestCase, context: &ChainContext, payload: &Payload) -> TransactionRequest {
    let flags = &case.flags;
    let mut tx = TransactionRequest {
        from: context.sender,
        gas: GAS_LIMIT,
        gas_price: context.gas_price,
        chain_id: context.chain_id,
        nonce: context.nonce,
        eth_compatible: flags.compat_mode,
        ..Default::default()
    };

    if flags.fee_currency {
        tx.fee_currency = Some(context.fee_currency);
    }
    if flags.gateway_fee {
        tx.gateway_fee = Some(payload.gateway_fee);
    }
    if flags.gateway_fee_recipient {
        tx.gateway_fee_recipient = Some(payload.gateway_fee_recipient);
    }

    if flags.contract_creation {
        tx.data = Some(payload.bytecode.clone());
    } else {
        tx.to = Some(payload.to);
        tx.value = Some(payload.value);
    }
    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_matrix::{Feature, FeatureFlags};

    fn context() -> ChainContext {
        ChainContext {
            chain_id: 1101,
            gas_price: 5_000_000_000,
            sender: "0xd927E9e733a46f46e18528148D8b98E496545f66".parse().unwrap(),
            nonce: 11,
            fee_currency: "0x000000000000000000000000000000000000d008".parse().unwrap(),
        }
    }

    fn case(flags: FeatureFlags) -> TestCase {
        TestCase::new(flags).unwrap()
    }

    #[test]
    fn transfer_with_fee_currency() {
        let payload = Payload::standard().unwrap();
        let flags = FeatureFlags::default().with(Feature::FeeCurrency, true);
        let tx = build(&case(flags), &context(), &payload);

        assert_eq!(tx.fee_currency, Some(context().fee_currency));
        assert_eq!(tx.to, Some(payload.to));
        assert_eq!(tx.value, Some(5));
        assert!(tx.data.is_none());
        assert!(tx.gateway_fee.is_none() && tx.gateway_fee_recipient.is_none());
        assert_eq!(tx.gas, GAS_LIMIT);
        assert_eq!(tx.nonce, 11);
        assert!(!tx.eth_compatible);
    }

    #[test]
    fn contract_creation_has_bytecode_and_no_destination() {
        let payload = Payload::standard().unwrap();
        let flags = FeatureFlags::default()
            .with(Feature::ContractCreation, true)
            .with(Feature::CompatMode, true)
            .with(Feature::GatewayFee, true)
            .with(Feature::GatewayFeeRecipient, true);
        let tx = build(&case(flags), &context(), &payload);

        assert!(tx.is_contract_creation());
        assert!(tx.value.is_none());
        assert_eq!(tx.data.as_deref(), Some(payload.bytecode.as_slice()));
        assert_eq!(tx.gateway_fee, Some(0x25));
        assert!(tx.gateway_fee_recipient.is_some());
        assert!(tx.eth_compatible);
    }

    #[test]
    fn nonce_refresh_leaves_the_rest_untouched() {
        let refreshed = context().with_nonce(12);
        assert_eq!(refreshed.nonce, 12);
        assert_eq!(refreshed.chain_id, context().chain_id);
        assert_eq!(refreshed.sender, context().sender);
    }
}
