//! Eth-compatible signing with a single private key.

use crate::encoding::Encoding;
use crate::{Error, Result, SignedTransaction};
use donut_core::{Address, TransactionRequest, H256};
use donut_cryptography::{keccak256, KeyPair};
use tracing::debug;

/// An account that signs the eth-compatible (EIP-155) encoding
#[derive(Debug, Clone)]
pub struct Account {
    key_pair: KeyPair,
}

impl Account {
    pub fn new(key_pair: KeyPair) -> Self {
        Self { key_pair }
    }

    pub fn from_private_key_hex(private_key: &str) -> Result<Self> {
        Ok(Self::new(KeyPair::from_hex(private_key)?))
    }

    pub fn address(&self) -> Address {
        self.key_pair.address()
    }

    /// Hash signed for `tx`.
    pub fn signing_hash(tx: &TransactionRequest) -> H256 {
        keccak256(&Encoding::EthCompatible.signing_payload(tx))
    }

    /// Signs `tx` in the eth-compatible encoding. The `from` field is not
    /// consulted; the signature alone determines the sender.
    ///
    /// Fails with [`Error::IncompatibleFields`] when `tx` carries a fee
    /// currency or gateway fee field, since this encoding has no slot for them.
    pub fn sign_transaction(&self, tx: &TransactionRequest) -> Result<SignedTransaction> {
        if tx.has_native_only_fields() {
            return Err(Error::IncompatibleFields);
        }
        let signature = self.key_pair.sign_hash(&Self::signing_hash(tx))?;
        let raw = Encoding::EthCompatible.signed(tx, signature.v_eip155(tx.chain_id), &signature);
        let signed = SignedTransaction::new(raw);
        debug!(target: "donut::wallets", hash = %signed.hash, nonce = tx.nonce, "signed eth-compatible transaction");
        Ok(signed)
    }
}
