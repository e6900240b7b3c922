//! Compares what happened with what a case expected.

use crate::feature_matrix::{ExpectedOutcome, TestCase};
use crate::submitter::SubmissionResult;
use regex::RegexBuilder;
use serde::Serialize;

/// One checked statement about a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assertion {
    pub description: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Assertion {
    pub(crate) fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            detail: None,
        }
    }

    pub(crate) fn fail(description: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }

    pub(crate) fn check(description: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        if passed {
            Self::pass(description)
        } else {
            Self::fail(description, detail)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AssertionSet {
    pub assertions: Vec<Assertion>,
}

impl AssertionSet {
    pub fn push(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    pub fn passed(&self) -> bool {
        self.assertions.iter().all(|a| a.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|a| !a.passed)
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

/// Case-insensitive regex match, falling back to a substring match when the
/// pattern is not a valid regex.
pub fn matches_error(message: &str, pattern: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => regex.is_match(message),
        Err(_) => message.to_lowercase().contains(&pattern.to_lowercase()),
    }
}

pub fn verify(case: &TestCase, result: &SubmissionResult) -> AssertionSet {
    verify_outcome(&case.expected, case.flags.compat_mode, result)
}

/// Checks `result` against `expected`; on success the mined transaction's
/// compatibility flag must equal `compat_mode`.
pub fn verify_outcome(
    expected: &ExpectedOutcome,
    compat_mode: bool,
    result: &SubmissionResult,
) -> AssertionSet {
    let mut set = AssertionSet::default();
    match (expected, result) {
        (ExpectedOutcome::Success, SubmissionResult::Mined { transaction }) => {
            set.push(Assertion::pass("succeeds"));
            let reported = match transaction.eth_compatible {
                Some(flag) => format!("ethCompatible: {flag}"),
                None => "no ethCompatible field (field absent)".to_string(),
            };
            set.push(Assertion::check(
                format!("ethCompatible is {compat_mode}"),
                transaction.eth_compatible == Some(compat_mode),
                format!("mined transaction {} reports {reported}", transaction.hash),
            ));
        }
        (ExpectedOutcome::Success, SubmissionResult::Rejected { message }) => {
            set.push(Assertion::fail(
                "succeeds",
                format!("Got an error but expected the transaction to succeed: {message}"),
            ));
            set.push(Assertion::fail(
                format!("ethCompatible is {compat_mode}"),
                "no mined transaction to inspect",
            ));
        }
        (ExpectedOutcome::Failure { error_pattern, .. }, SubmissionResult::Rejected { message }) => {
            set.push(Assertion::check(
                expected.to_string(),
                matches_error(message, error_pattern),
                format!("Got \"{message}\", expected \"{error_pattern}\""),
            ));
        }
        (ExpectedOutcome::Failure { .. }, SubmissionResult::Mined { transaction }) => {
            set.push(Assertion::fail(
                expected.to_string(),
                format!(
                    "Expected an error but didn't get one: transaction {} was mined",
                    transaction.hash
                ),
            ));
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_matrix::{Feature, FeatureFlags};
    use donut_rpc_client::RpcTransaction;
    use serde_json::json;

    fn mined(eth_compatible: Option<bool>) -> SubmissionResult {
        let transaction: RpcTransaction = serde_json::from_value(json!({
            "hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "from": "0xd927e9e733a46f46e18528148d8b98e496545f66",
            "nonce": "0x1",
            "to": null,
            "value": "0x0",
            "gas": "0xf4240",
            "gasPrice": "0x1",
            "input": "0x",
            "blockHash": "0x0202020202020202020202020202020202020202020202020202020202020202",
            "ethCompatible": eth_compatible
        }))
        .unwrap();
        SubmissionResult::Mined { transaction }
    }

    fn case(flags: FeatureFlags) -> TestCase {
        TestCase::new(flags).unwrap()
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matches_error(
            "ETHCOMPATIBLE is true, but non-eth-compatible fields are present",
            "ethCompatible is true, but non-eth-compatible fields are present"
        ));
        assert!(matches_error("rlp: replay protection is required", "replay protection"));
        assert!(!matches_error("nonce too low", "replay protection"));
        assert!(matches_error("bad (pattern", "(pattern"));
    }

    #[test]
    fn success_checks_compat_flag() {
        let compat = case(FeatureFlags::default().with(Feature::CompatMode, true));
        assert!(verify(&compat, &mined(Some(true))).passed());
        let set = verify(&compat, &mined(Some(false)));
        assert!(!set.passed());
        assert_eq!(set.failures().count(), 1);

        let native = case(FeatureFlags::default());
        assert!(verify(&native, &mined(Some(false))).passed());
    }

    #[test]
    fn absent_compat_flag_fails_success_case() {
        let native = case(FeatureFlags::default());
        let set = verify(&native, &mined(None));
        assert!(!set.passed());
        let failure = set.failures().next().unwrap();
        assert_eq!(failure.description, "ethCompatible is false");
        assert!(failure.detail.as_ref().unwrap().contains("field absent"));

        let compat = case(FeatureFlags::default().with(Feature::CompatMode, true));
        assert!(!verify(&compat, &mined(None)).passed());
    }

    #[test]
    fn unexpected_rejection_fails_with_message() {
        let set = verify(
            &case(FeatureFlags::default()),
            &SubmissionResult::rejected("insufficient funds for gas * price + value"),
        );
        assert!(!set.passed());
        let failure = set.failures().next().unwrap();
        assert!(failure.detail.as_ref().unwrap().contains("insufficient funds"));
    }

    #[test]
    fn expected_failure() {
        let flags = FeatureFlags::default()
            .with(Feature::CompatMode, true)
            .with(Feature::GatewayFee, true);
        let failing = case(flags);
        assert!(verify(
            &failing,
            &SubmissionResult::rejected(
                "ethCompatible is true, but non-eth-compatible fields are present"
            )
        )
        .passed());
        assert!(!verify(&failing, &SubmissionResult::rejected("nonce too low")).passed());

        let set = verify(&failing, &mined(Some(true)));
        assert!(!set.passed());
        assert!(set.assertions[0]
            .detail
            .as_ref()
            .unwrap()
            .starts_with("Expected an error"));
    }
}
