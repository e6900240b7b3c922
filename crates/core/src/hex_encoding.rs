//! Hex helpers for the JSON-RPC wire format.
//!
//! Byte strings travel as `0x`-prefixed hex ("data"), integers as minimal
//! `0x`-prefixed hex without leading zeros ("quantity", zero is `0x0`).

use crate::{CoreError, CoreResult};

/// Strips an optional `0x`/`0X` prefix.
pub fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Encodes bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes hex with or without prefix. `0x` alone decodes to an empty vector.
pub fn decode_hex(value: &str) -> CoreResult<Vec<u8>> {
    let digits = strip_0x(value.trim());
    hex::decode(digits).map_err(|e| CoreError::InvalidHex {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Encodes an integer as a JSON-RPC quantity.
pub fn encode_quantity(value: u128) -> String {
    format!("{:#x}", value)
}

/// Parses a JSON-RPC quantity into a `u128`.
pub fn parse_quantity(value: &str) -> CoreResult<u128> {
    let digits = strip_0x(value.trim());
    if digits.is_empty() {
        return Err(CoreError::InvalidQuantity(value.to_string()));
    }
    u128::from_str_radix(digits, 16).map_err(|_| CoreError::InvalidQuantity(value.to_string()))
}

/// Parses a JSON-RPC quantity that must fit in a `u64` (nonces, chain ids, block numbers).
pub fn parse_quantity_u64(value: &str) -> CoreResult<u64> {
    let wide = parse_quantity(value)?;
    u64::try_from(wide).map_err(|_| CoreError::InvalidQuantity(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_have_no_leading_zeros() {
        assert_eq!(encode_quantity(0), "0x0");
        assert_eq!(encode_quantity(0x25), "0x25");
        assert_eq!(encode_quantity(1_000_000), "0xf4240");
    }

    #[test]
    fn parse_quantity_accepts_both_prefixes_and_rejects_garbage() {
        assert_eq!(parse_quantity("0xf4240").unwrap(), 1_000_000);
        assert_eq!(parse_quantity("0XA").unwrap(), 10);
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
        assert!(parse_quantity_u64("0x10000000000000000").is_err());
    }

    #[test]
    fn empty_data_decodes_to_empty_bytes() {
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(encode_hex(&[]), "0x");
        assert_eq!(decode_hex("0xdead").unwrap(), vec![0xde, 0xad]);
        assert!(decode_hex("0xabc").is_err());
    }
}
