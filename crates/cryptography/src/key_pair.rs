//! Private keys and the accounts they control.

use crate::ecdsa::{address_from_public_key, RecoverableSignature};
use crate::{Error, Result};
use donut_core::{hex_encoding::strip_0x, Address, H256};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use std::fmt;

/// A secp256k1 private key together with its derived address.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret_key: SecretKey,
    address: Address,
}

impl KeyPair {
    /// Creates a key pair from 32 raw private key bytes.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(private_key)
            .map_err(|e| Error::InvalidKey(format!("Invalid secp256k1 private key: {e}")))?;
        let public_key = PublicKey::from_secret_key(SECP256K1, &secret_key);
        Ok(Self {
            secret_key,
            address: address_from_public_key(&public_key),
        })
    }

    /// Creates a key pair from hex, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let bytes = hex::decode(strip_0x(private_key.trim()))
            .map_err(|e| Error::InvalidKey(format!("Invalid private key hex: {e}")))?;
        Self::from_private_key(&bytes)
    }

    /// The account controlled by this key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs a 32-byte digest deterministically (RFC 6979, low-s).
    pub fn sign_hash(&self, hash: &H256) -> Result<RecoverableSignature> {
        let message = Message::from_digest_slice(hash.as_bytes())
            .map_err(|_| Error::InvalidSignature("Invalid message hash for secp256k1".to_string()))?;
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret_key);
        Ok(RecoverableSignature::from_secp256k1(&signature))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_known_address() {
        let key = KeyPair::from_hex(
            "0x4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        assert_eq!(
            key.address().to_string(),
            "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"
        );
    }

    #[test]
    fn rejects_zero_and_malformed_keys() {
        assert!(KeyPair::from_private_key(&[0u8; 32]).is_err());
        assert!(KeyPair::from_private_key(&[1u8; 31]).is_err());
        assert!(KeyPair::from_hex("not hex").is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = KeyPair::from_private_key(&[0x46u8; 32]).unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("4646464646"));
        assert!(printed.contains("9d8a62f6"));
    }
}
