//! Donut Conformance
//!
//! Combinatorial conformance testing of a node's transaction-acceptance
//! rules. Every combination of the six transaction features is expanded
//! into a [`TestCase`] with a statically known [`ExpectedOutcome`], turned
//! into a transaction, submitted through the path the case names and
//! checked against what the node actually did.
//!
//! ```no_run
//! use donut_conformance::{FeatureFilter, Orchestrator};
//! use donut_config::HarnessConfig;
//!
//! # async fn run() -> donut_conformance::Result<()> {
//! let orchestrator = Orchestrator::new(HarnessConfig::default(), FeatureFilter::default())?;
//! let report = orchestrator.run().await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod feature_matrix;
pub mod lifecycle;
pub mod orchestrator;
pub mod report;
pub mod submitter;
pub mod unprotected;
pub mod validator_bls;
pub mod verifier;

pub use builder::{build, ChainContext, Payload};
pub use error::{HarnessError, Result};
pub use feature_matrix::{
    generate_cases, ExpectedOutcome, Feature, FeatureFilter, FeatureFlags, TestCase,
    UnconstructableCase, INCOMPATIBLE_FIELDS_REASON,
};
pub use lifecycle::AccountUnlock;
pub use orchestrator::Orchestrator;
pub use report::{CaseKind, CaseReport, RunReport};
pub use submitter::{ObservedOutcome, SubmissionResult, Submitter};
pub use unprotected::{
    build_and_submit_unprotected, UnprotectedTransaction, UnprotectedTxSpec,
    NO_REPLAY_PROTECTION_REASON,
};
pub use validator_bls::{check_validator_bls_keys, BlsKeyReport};
pub use verifier::{matches_error, verify, verify_outcome, Assertion, AssertionSet};
