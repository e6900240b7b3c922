//! 20-byte account addresses.

use crate::fixed_bytes::impl_fixed_bytes;

/// An account or contract address. Formats as lowercase `0x` hex; parsing
/// ignores case, so checksummed input compares equal to its lowercase form.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub(crate) [u8; 20]);

impl_fixed_bytes!(Address, 20, "Address");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksummed_and_lowercase_parse_equal() {
        let mixed: Address = "0x8c36775E95A5f7FEf6894Ba658628352Ac58605B".parse().unwrap();
        let lower: Address = "8c36775e95a5f7fef6894ba658628352ac58605b".parse().unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed.to_string(), "0x8c36775e95a5f7fef6894ba658628352ac58605b");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!(Address::from_slice(&[0u8; 32]).is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let address: Address = "0x000000000000000000000000000000000000ce10".parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x000000000000000000000000000000000000ce10\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
