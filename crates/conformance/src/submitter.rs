//! Dual-path submission: node-side signing or client-side raw signing.

use crate::feature_matrix::TestCase;
use donut_core::{TransactionRequest, H256};
use donut_rpc_client::{RpcClient, RpcException, RpcTransaction, TransactionApi};
use donut_wallets::{LocalWallet, SigningStrategy};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// What came back from the node for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Mined { transaction: RpcTransaction },
    Rejected { message: String },
}

impl SubmissionResult {
    pub fn rejected(message: impl Into<String>) -> Self {
        SubmissionResult::Rejected {
            message: message.into(),
        }
    }

    pub fn mined(&self) -> Option<&RpcTransaction> {
        match self {
            SubmissionResult::Mined { transaction } => Some(transaction),
            SubmissionResult::Rejected { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionResult::Mined { .. } => None,
            SubmissionResult::Rejected { message } => Some(message),
        }
    }

    /// Serializable summary for reports.
    pub fn observed(&self) -> ObservedOutcome {
        match self {
            SubmissionResult::Mined { transaction } => ObservedOutcome::Mined {
                hash: transaction.hash,
                block_number: transaction.block_number,
                eth_compatible: transaction.eth_compatible,
            },
            SubmissionResult::Rejected { message } => ObservedOutcome::Rejected {
                message: message.clone(),
            },
        }
    }
}

/// Report form of a [`SubmissionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObservedOutcome {
    Mined {
        hash: H256,
        block_number: Option<u64>,
        eth_compatible: Option<bool>,
    },
    Rejected {
        message: String,
    },
}

#[derive(Debug, Error)]
enum SubmitError {
    #[error(transparent)]
    Rpc(#[from] RpcException),

    #[error(transparent)]
    Signing(#[from] donut_wallets::Error),
}

/// Sends transactions down one of two channels and waits for them.
pub struct Submitter {
    rpc_client: Arc<RpcClient>,
    transactions: TransactionApi,
    wallet: LocalWallet,
}

impl Submitter {
    pub fn new(rpc_client: Arc<RpcClient>, transactions: TransactionApi, wallet: LocalWallet) -> Self {
        Self {
            rpc_client,
            transactions,
            wallet,
        }
    }

    /// Submits `tx` through the channel selected by the case and waits for
    /// the mined transaction. Every failure along the way becomes
    /// [`SubmissionResult::Rejected`].
    pub async fn submit(&self, tx: &TransactionRequest, case: &TestCase) -> SubmissionResult {
        let outcome = if case.flags.raw_submission {
            let strategy = SigningStrategy::for_compat_mode(case.flags.compat_mode);
            self.submit_signed(tx, strategy).await
        } else {
            self.submit_standard(tx).await
        };
        Self::into_result(outcome)
    }

    /// Broadcasts an already encoded transaction and waits for it.
    pub async fn submit_raw(&self, raw: &[u8]) -> SubmissionResult {
        Self::into_result(self.broadcast(raw).await)
    }

    async fn submit_standard(&self, tx: &TransactionRequest) -> Result<RpcTransaction, SubmitError> {
        debug!(target: "donut::submit", nonce = tx.nonce, "eth_sendTransaction");
        let hash = self.rpc_client.send_transaction(tx).await?;
        Ok(self.transactions.wait_for_transaction(&hash).await?)
    }

    async fn submit_signed(
        &self,
        tx: &TransactionRequest,
        strategy: SigningStrategy,
    ) -> Result<RpcTransaction, SubmitError> {
        let signed = strategy.sign(&self.wallet, tx)?;
        debug!(target: "donut::submit", %strategy, hash = %signed.hash, "eth_sendRawTransaction");
        self.broadcast(&signed.raw).await
    }

    async fn broadcast(&self, raw: &[u8]) -> Result<RpcTransaction, SubmitError> {
        let hash = self.rpc_client.send_raw_transaction(raw).await?;
        Ok(self.transactions.wait_for_transaction(&hash).await?)
    }

    fn into_result(outcome: Result<RpcTransaction, SubmitError>) -> SubmissionResult {
        match outcome {
            Ok(transaction) => SubmissionResult::Mined { transaction },
            Err(err) => {
                debug!(target: "donut::submit", error = %err, "submission rejected");
                SubmissionResult::rejected(err.to_string())
            }
        }
    }
}
