//! Hash functions.

use donut_core::H256;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of the input data (the pre-standard SHA-3
/// padding used for transaction hashes and address derivation).
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::new(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            keccak256(b"").to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
