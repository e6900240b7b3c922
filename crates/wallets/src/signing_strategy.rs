use crate::{LocalWallet, Result, SignedTransaction};
use donut_core::TransactionRequest;
use std::fmt;

/// How a raw transaction gets signed before broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningStrategy {
    /// Eth-compatible encoding signed with the sender's key
    StandardAccount,
    /// Native encoding signed by the local wallet
    LocalWallet,
}

impl SigningStrategy {
    pub fn for_compat_mode(compat_mode: bool) -> Self {
        if compat_mode {
            SigningStrategy::StandardAccount
        } else {
            SigningStrategy::LocalWallet
        }
    }

    /// Signs `tx` with the key the wallet holds for `tx.from`.
    pub fn sign(self, wallet: &LocalWallet, tx: &TransactionRequest) -> Result<SignedTransaction> {
        match self {
            SigningStrategy::StandardAccount => wallet.account(&tx.from)?.sign_transaction(tx),
            SigningStrategy::LocalWallet => wallet.sign_transaction(tx),
        }
    }
}

impl fmt::Display for SigningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningStrategy::StandardAccount => write!(f, "standard-account"),
            SigningStrategy::LocalWallet => write!(f, "local-wallet"),
        }
    }
}
