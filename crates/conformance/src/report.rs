//! Per-case results of a run.

use crate::builder::ChainContext;
use crate::feature_matrix::{ExpectedOutcome, FeatureFlags, TestCase};
use crate::submitter::{ObservedOutcome, SubmissionResult};
use crate::unprotected::UnprotectedTxSpec;
use crate::verifier::{verify_outcome, Assertion, AssertionSet};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Matrix,
    ReplayProtection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub label: String,
    pub kind: CaseKind,
    /// Present for matrix cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<FeatureFlags>,
    pub compat_mode: bool,
    pub expected: ExpectedOutcome,
    pub observed: ObservedOutcome,
    pub assertions: AssertionSet,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.assertions.passed()
    }
}

/// A case that has started but has no outcome yet.
#[derive(Debug, Clone)]
pub(crate) struct PendingCase {
    pub(crate) label: String,
    kind: CaseKind,
    flags: Option<FeatureFlags>,
    compat_mode: bool,
    expected: ExpectedOutcome,
}

impl PendingCase {
    pub(crate) fn matrix(case: &TestCase) -> Self {
        Self {
            label: case.label(),
            kind: CaseKind::Matrix,
            flags: Some(case.flags),
            compat_mode: case.flags.compat_mode,
            expected: case.expected.clone(),
        }
    }

    pub(crate) fn replay_protection(compat_mode: bool) -> Self {
        Self {
            label: UnprotectedTxSpec::label_for(compat_mode),
            kind: CaseKind::ReplayProtection,
            flags: None,
            compat_mode,
            expected: UnprotectedTxSpec::expected_outcome(),
        }
    }

    /// Flags in log form, `ethCompatible=..` for replay-protection cases.
    pub(crate) fn flags_summary(&self) -> String {
        match &self.flags {
            Some(flags) => flags.to_string(),
            None => format!("ethCompatible={}", self.compat_mode),
        }
    }

    /// Verifies `result` against the expected outcome.
    pub(crate) fn complete(self, result: &SubmissionResult) -> CaseReport {
        let assertions = verify_outcome(&self.expected, self.compat_mode, result);
        self.into_report(result, assertions)
    }

    /// Records the case as failed because the suite timeout ended the run.
    pub(crate) fn interrupted(self, timeout_secs: u64) -> CaseReport {
        let message = format!("suite timeout of {timeout_secs}s elapsed before the case completed");
        let mut assertions = AssertionSet::default();
        assertions.push(Assertion::fail(
            "completes before the suite timeout",
            message.clone(),
        ));
        self.into_report(&SubmissionResult::rejected(message), assertions)
    }

    fn into_report(self, result: &SubmissionResult, assertions: AssertionSet) -> CaseReport {
        CaseReport {
            label: self.label,
            kind: self.kind,
            flags: self.flags,
            compat_mode: self.compat_mode,
            expected: self.expected,
            observed: result.observed(),
            assertions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub context: ChainContext,
    pub cases: Vec<CaseReport>,
    /// Set when the suite timeout cut the run short
    pub timed_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teardown_error: Option<String>,
}

impl RunReport {
    pub fn new(context: ChainContext) -> Self {
        Self {
            context,
            cases: Vec::new(),
            timed_out: false,
            teardown_error: None,
        }
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// A timed out run never counts as passing.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0 && !self.timed_out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in &self.cases {
            let mark = if case.passed() { "ok" } else { "FAILED" };
            writeln!(f, "{mark:>6}  {}", case.label)?;
            for assertion in &case.assertions.assertions {
                if assertion.passed {
                    continue;
                }
                writeln!(f, "          - {}", assertion.description)?;
                if let Some(detail) = &assertion.detail {
                    writeln!(f, "            {detail}")?;
                }
            }
        }
        write!(
            f,
            "\n{} passed, {} failed (chain {}, sender {})",
            self.passed(),
            self.failed(),
            self.context.chain_id,
            self.context.sender
        )?;
        if self.timed_out {
            write!(f, "; suite timeout elapsed")?;
        }
        if let Some(err) = &self.teardown_error {
            write!(f, "; teardown failed: {err}")?;
        }
        Ok(())
    }
}
