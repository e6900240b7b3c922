use donut_core::{encode_hex, H256};
use donut_cryptography::keccak256;

/// A signed, encoded transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The encoded transaction
    pub raw: Vec<u8>,
    /// Keccak-256 of `raw`, the hash the node reports
    pub hash: H256,
}

impl SignedTransaction {
    pub fn new(raw: Vec<u8>) -> Self {
        let hash = keccak256(&raw);
        Self { raw, hash }
    }

    pub fn raw_hex(&self) -> String {
        encode_hex(&self.raw)
    }
}
