//! A keystore signing the node's native encoding.

use crate::encoding::Encoding;
use crate::{Account, Error, Result, SignedTransaction};
use donut_core::{Address, TransactionRequest, H256};
use donut_cryptography::{keccak256, KeyPair};
use std::collections::HashMap;
use tracing::debug;

/// Private keys indexed by address. Transactions are signed with the key
/// matching their `from` field.
#[derive(Debug, Default, Clone)]
pub struct LocalWallet {
    accounts: HashMap<Address, KeyPair>,
}

impl LocalWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hex private key and returns the address it controls.
    pub fn add_account(&mut self, private_key: &str) -> Result<Address> {
        let key_pair = KeyPair::from_hex(private_key)?;
        let address = key_pair.address();
        self.accounts.insert(address, key_pair);
        Ok(address)
    }

    /// An eth-compatible signer for a known address.
    pub fn account(&self, address: &Address) -> Result<Account> {
        self.accounts
            .get(address)
            .cloned()
            .map(Account::new)
            .ok_or(Error::AccountNotFound(*address))
    }

    /// Hash signed for `tx` in the native encoding.
    pub fn signing_hash(tx: &TransactionRequest) -> H256 {
        keccak256(&Encoding::Native.signing_payload(tx))
    }

    /// Signs `tx` in the native encoding with the key of `tx.from`.
    pub fn sign_transaction(&self, tx: &TransactionRequest) -> Result<SignedTransaction> {
        let key_pair = self
            .accounts
            .get(&tx.from)
            .ok_or(Error::AccountNotFound(tx.from))?;
        let signature = key_pair.sign_hash(&Self::signing_hash(tx))?;
        let raw = Encoding::Native.signed(tx, signature.v_eip155(tx.chain_id), &signature);
        let signed = SignedTransaction::new(raw);
        debug!(target: "donut::wallets", hash = %signed.hash, from = %tx.from, nonce = tx.nonce, "signed native transaction");
        Ok(signed)
    }
}
