//! Recoverable ECDSA signatures over secp256k1.

use crate::{hash::keccak256, Error, Result};
use donut_config::HASH_SIZE;
use donut_core::{Address, H256};
use secp256k1::{
    ecdsa::{RecoverableSignature as Secp256k1RecoverableSignature, RecoveryId},
    Message, PublicKey, SECP256K1,
};

/// A signature split into the components carried by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Recovery id, 0 or 1 for low-s signatures
    pub recovery_id: u8,
    pub r: [u8; HASH_SIZE],
    pub s: [u8; HASH_SIZE],
}

impl RecoverableSignature {
    /// `v` of a transaction without replay protection (27 or 28).
    pub fn v_legacy(&self) -> u64 {
        27 + self.recovery_id as u64
    }

    /// `v` of a replay-protected transaction for `chain_id` (EIP-155).
    pub fn v_eip155(&self, chain_id: u64) -> u64 {
        self.recovery_id as u64 + 35 + 2 * chain_id
    }

    /// `r` as a minimal big-endian integer.
    pub fn r_scalar(&self) -> &[u8] {
        strip_leading_zeros(&self.r)
    }

    /// `s` as a minimal big-endian integer.
    pub fn s_scalar(&self) -> &[u8] {
        strip_leading_zeros(&self.s)
    }

    pub(crate) fn from_secp256k1(signature: &Secp256k1RecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut r = [0u8; HASH_SIZE];
        let mut s = [0u8; HASH_SIZE];
        r.copy_from_slice(&compact[..HASH_SIZE]);
        s.copy_from_slice(&compact[HASH_SIZE..]);
        Self {
            recovery_id: recovery_id.to_i32() as u8,
            r,
            s,
        }
    }

    fn to_secp256k1(self) -> Result<Secp256k1RecoverableSignature> {
        let rec_id = RecoveryId::from_i32(self.recovery_id as i32)
            .map_err(|_| Error::InvalidSignature("Invalid recovery ID for secp256k1".to_string()))?;
        let mut compact = [0u8; 64];
        compact[..HASH_SIZE].copy_from_slice(&self.r);
        compact[HASH_SIZE..].copy_from_slice(&self.s);
        Secp256k1RecoverableSignature::from_compact(&compact, rec_id)
            .map_err(|e| Error::InvalidSignature(format!("Invalid recoverable signature format: {e}")))
    }
}

fn strip_leading_zeros(word: &[u8]) -> &[u8] {
    let start = word.iter().position(|b| *b != 0).unwrap_or(word.len());
    &word[start..]
}

/// Derives the account address of an uncompressed public key.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(address)
}

/// Recovers the address that produced `signature` over `hash`.
pub fn recover_address(hash: &H256, signature: &RecoverableSignature) -> Result<Address> {
    let message = Message::from_digest_slice(hash.as_bytes())
        .map_err(|_| Error::InvalidSignature("Invalid message hash for secp256k1".to_string()))?;
    let public_key = SECP256K1
        .recover_ecdsa(&message, &signature.to_secp256k1()?)
        .map_err(|_| Error::InvalidSignature("Public key recovery failed".to_string()))?;
    Ok(address_from_public_key(&public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v_values() {
        let signature = RecoverableSignature {
            recovery_id: 1,
            r: [1u8; 32],
            s: [2u8; 32],
        };
        assert_eq!(signature.v_legacy(), 28);
        assert_eq!(signature.v_eip155(1), 38);
        assert_eq!(signature.v_eip155(44787), 89_610);
    }

    #[test]
    fn scalars_drop_leading_zeros() {
        let mut r = [0u8; 32];
        r[2] = 0x7f;
        let signature = RecoverableSignature {
            recovery_id: 0,
            r,
            s: [0u8; 32],
        };
        assert_eq!(signature.r_scalar().len(), 30);
        assert_eq!(signature.r_scalar()[0], 0x7f);
        assert!(signature.s_scalar().is_empty());
    }

    #[test]
    fn out_of_range_recovery_id_is_rejected() {
        let signature = RecoverableSignature {
            recovery_id: 9,
            r: [1u8; 32],
            s: [2u8; 32],
        };
        assert!(recover_address(&H256::ZERO, &signature).is_err());
    }
}
