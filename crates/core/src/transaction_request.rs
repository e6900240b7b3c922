//! Transaction requests as handed to the node or to a local signer.

use crate::hex_encoding::{encode_hex, encode_quantity};
use crate::Address;
use serde_json::{Map, Value};

/// An unsigned transaction. Optional fields are either present or absent;
/// an absent native-only field is never the same as a zeroed one, because
/// presence is what selects the native encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionRequest {
    pub from: Address,
    pub gas: u64,
    pub gas_price: u128,
    pub chain_id: u64,
    pub nonce: u64,
    /// Destination; `None` creates a contract
    pub to: Option<Address>,
    pub value: Option<u128>,
    /// Call data or contract init code
    pub data: Option<Vec<u8>>,
    pub fee_currency: Option<Address>,
    pub gateway_fee: Option<u128>,
    pub gateway_fee_recipient: Option<Address>,
    /// Serialized only when set, so that omission keeps the node's default handling
    pub eth_compatible: bool,
}

impl TransactionRequest {
    /// Whether any field that only the native encoding can carry is present.
    pub fn has_native_only_fields(&self) -> bool {
        self.fee_currency.is_some()
            || self.gateway_fee.is_some()
            || self.gateway_fee_recipient.is_some()
    }

    /// Whether this request deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Converts to the JSON object expected by `eth_sendTransaction`.
    pub fn to_json(&self) -> Value {
        let mut json = Map::new();
        json.insert("from".to_string(), Value::String(self.from.to_string()));
        json.insert(
            "gas".to_string(),
            Value::String(encode_quantity(self.gas as u128)),
        );
        json.insert(
            "gasPrice".to_string(),
            Value::String(encode_quantity(self.gas_price)),
        );
        json.insert(
            "chainId".to_string(),
            Value::String(encode_quantity(self.chain_id as u128)),
        );
        json.insert(
            "nonce".to_string(),
            Value::String(encode_quantity(self.nonce as u128)),
        );
        if let Some(to) = &self.to {
            json.insert("to".to_string(), Value::String(to.to_string()));
        }
        if let Some(value) = self.value {
            json.insert("value".to_string(), Value::String(encode_quantity(value)));
        }
        if let Some(data) = &self.data {
            json.insert("data".to_string(), Value::String(encode_hex(data)));
        }
        if let Some(fee_currency) = &self.fee_currency {
            json.insert(
                "feeCurrency".to_string(),
                Value::String(fee_currency.to_string()),
            );
        }
        if let Some(gateway_fee) = self.gateway_fee {
            json.insert(
                "gatewayFee".to_string(),
                Value::String(encode_quantity(gateway_fee)),
            );
        }
        if let Some(recipient) = &self.gateway_fee_recipient {
            json.insert(
                "gatewayFeeRecipient".to_string(),
                Value::String(recipient.to_string()),
            );
        }
        if self.eth_compatible {
            json.insert("ethCompatible".to_string(), Value::Bool(true));
        }
        Value::Object(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> TransactionRequest {
        TransactionRequest {
            from: "0xd927E9e733a46f46e18528148D8b98E496545f66".parse().unwrap(),
            gas: 1_000_000,
            gas_price: 2_500_000_000,
            chain_id: 1101,
            nonce: 7,
            to: Some("0x8c36775E95A5f7FEf6894Ba658628352Ac58605B".parse().unwrap()),
            value: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn plain_transfer_omits_absent_fields() {
        let json = transfer().to_json();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["gas"], "0xf4240");
        assert_eq!(obj["nonce"], "0x7");
        assert_eq!(obj["value"], "0x5");
        for absent in ["data", "feeCurrency", "gatewayFee", "gatewayFeeRecipient", "ethCompatible"] {
            assert!(!obj.contains_key(absent), "{absent} should be absent");
        }
    }

    #[test]
    fn eth_compatible_flag_only_appears_when_true() {
        let mut tx = transfer();
        tx.eth_compatible = true;
        assert_eq!(tx.to_json()["ethCompatible"], Value::Bool(true));
        tx.eth_compatible = false;
        assert!(tx.to_json().get("ethCompatible").is_none());
    }

    #[test]
    fn native_only_fields_are_detected_and_serialized() {
        let mut tx = transfer();
        assert!(!tx.has_native_only_fields());
        tx.gateway_fee = Some(0x25);
        assert!(tx.has_native_only_fields());
        assert_eq!(tx.to_json()["gatewayFee"], "0x25");
    }

    #[test]
    fn creation_has_no_destination() {
        let mut tx = transfer();
        tx.to = None;
        tx.value = None;
        tx.data = Some(vec![0x60, 0x80]);
        assert!(tx.is_contract_creation());
        let json = tx.to_json();
        assert!(json.get("to").is_none());
        assert_eq!(json["data"], "0x6080");
    }
}
