//! Transactions signed without replay protection.
//!
//! The tuple is assembled by hand: no chain id goes into the signing hash
//! and `v` is 27 or 28. In native mode the three celo-only slots are present
//! and empty; in compat mode they are left out, which is what marks the
//! tuple as eth-compatible.

use crate::builder::{ChainContext, Payload};
use crate::feature_matrix::ExpectedOutcome;
use crate::submitter::{SubmissionResult, Submitter};
use donut_config::{GAS_LIMIT, NO_REPLAY_PROTECTION_ERROR};
use donut_core::{Address, H256};
use donut_cryptography::{keccak256, KeyPair, RecoverableSignature};
use rlp::RlpStream;
use tracing::debug;

/// Reason tag of the expected rejection.
pub const NO_REPLAY_PROTECTION_REASON: &str = "replay protection is mandatory";

/// Fields of an unprotected transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnprotectedTxSpec {
    pub compat_mode: bool,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas: u64,
    pub to: Address,
    pub value: u128,
}

/// The signed encoding together with the signature over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnprotectedTransaction {
    pub raw: Vec<u8>,
    pub signing_hash: H256,
    pub signature: RecoverableSignature,
}

impl UnprotectedTxSpec {
    pub fn new(compat_mode: bool, context: &ChainContext, payload: &Payload) -> Self {
        Self {
            compat_mode,
            nonce: context.nonce,
            gas_price: context.gas_price,
            gas: GAS_LIMIT,
            to: payload.to,
            value: payload.value,
        }
    }

    pub fn label(&self) -> String {
        Self::label_for(self.compat_mode)
    }

    pub fn label_for(compat_mode: bool) -> String {
        format!("Transaction without replay protection, ethCompatible: {compat_mode}")
    }

    /// Rejection is expected in both modes.
    pub fn expected_outcome() -> ExpectedOutcome {
        ExpectedOutcome::Failure {
            error_pattern: NO_REPLAY_PROTECTION_ERROR,
            reason: NO_REPLAY_PROTECTION_REASON,
        }
    }

    fn field_count(&self) -> usize {
        if self.compat_mode {
            6
        } else {
            9
        }
    }

    fn append_fields(&self, stream: &mut RlpStream) {
        stream
            .append(&self.nonce)
            .append(&self.gas_price)
            .append(&self.gas);
        if !self.compat_mode {
            stream
                .append_empty_data()
                .append_empty_data()
                .append_empty_data();
        }
        stream
            .append(&self.to.to_vec())
            .append(&self.value)
            .append_empty_data();
    }

    /// Keccak-256 of the encoded field tuple.
    pub fn signing_hash(&self) -> H256 {
        let mut stream = RlpStream::new_list(self.field_count());
        self.append_fields(&mut stream);
        keccak256(&stream.out())
    }

    pub fn sign(&self, key: &KeyPair) -> donut_cryptography::Result<UnprotectedTransaction> {
        let signing_hash = self.signing_hash();
        let signature = key.sign_hash(&signing_hash)?;
        let mut stream = RlpStream::new_list(self.field_count() + 3);
        self.append_fields(&mut stream);
        stream
            .append(&signature.v_legacy())
            .append(&signature.r_scalar().to_vec())
            .append(&signature.s_scalar().to_vec());
        Ok(UnprotectedTransaction {
            raw: stream.out().to_vec(),
            signing_hash,
            signature,
        })
    }
}

/// Builds, signs and broadcasts an unprotected transaction. Signing errors
/// are reported as a rejection like any other failure.
pub async fn build_and_submit_unprotected(
    spec: &UnprotectedTxSpec,
    key: &KeyPair,
    submitter: &Submitter,
) -> SubmissionResult {
    match spec.sign(key) {
        Ok(tx) => {
            debug!(target: "donut::unprotected", compat_mode = spec.compat_mode, hash = %tx.signing_hash, "submitting unprotected transaction");
            submitter.submit_raw(&tx.raw).await
        }
        Err(err) => SubmissionResult::rejected(err.to_string()),
    }
}
