//! 32-byte hashes.

use crate::fixed_bytes::impl_fixed_bytes;

/// A 32-byte hash, used for transaction and block hashes.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct H256(pub(crate) [u8; 32]);

impl_fixed_bytes!(H256, 32, "H256");

impl H256 {
    /// Returns the bytes as an owned array.
    pub fn to_array(self) -> [u8; 32] {
        self.0
    }
}
