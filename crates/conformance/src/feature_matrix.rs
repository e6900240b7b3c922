//! Dimensions of the test space and the generator over them.
//!
//! Six boolean features span 64 combinations. Combinations that ask for a
//! raw eth-compatible transaction carrying fee currency or gateway fee
//! fields cannot be encoded at all and are left out; the remaining ones get
//! an expected outcome from the incompatible-fields rule.

use donut_config::INCOMPATIBLE_FIELDS_ERROR;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Reason tag attached to the incompatible-fields failure.
pub const INCOMPATIBLE_FIELDS_REASON: &str = "transaction has celo-only fields";

/// One boolean dimension of the test space, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CompatMode,
    ContractCreation,
    FeeCurrency,
    GatewayFee,
    GatewayFeeRecipient,
    RawSubmission,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::CompatMode,
        Feature::ContractCreation,
        Feature::FeeCurrency,
        Feature::GatewayFee,
        Feature::GatewayFeeRecipient,
        Feature::RawSubmission,
    ];

    /// Name used in case labels.
    pub fn name(self) -> &'static str {
        match self {
            Feature::CompatMode => "ethCompatible",
            Feature::ContractCreation => "contractCreation",
            Feature::FeeCurrency => "useFeeCurrency",
            Feature::GatewayFee => "useGatewayFee",
            Feature::GatewayFeeRecipient => "useGatewayFeeRecipient",
            Feature::RawSubmission => "sendRawTransaction",
        }
    }

    /// Bit of this feature in a generation mask; the first feature is the
    /// most significant so that counting up is lexicographic.
    fn bit(self) -> u8 {
        1 << (Feature::ALL.len() - 1 - self as usize)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The feature values of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub compat_mode: bool,
    pub contract_creation: bool,
    pub fee_currency: bool,
    pub gateway_fee: bool,
    pub gateway_fee_recipient: bool,
    pub raw_submission: bool,
}

impl FeatureFlags {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::CompatMode => self.compat_mode,
            Feature::ContractCreation => self.contract_creation,
            Feature::FeeCurrency => self.fee_currency,
            Feature::GatewayFee => self.gateway_fee,
            Feature::GatewayFeeRecipient => self.gateway_fee_recipient,
            Feature::RawSubmission => self.raw_submission,
        }
    }

    pub fn with(mut self, feature: Feature, value: bool) -> Self {
        let slot = match feature {
            Feature::CompatMode => &mut self.compat_mode,
            Feature::ContractCreation => &mut self.contract_creation,
            Feature::FeeCurrency => &mut self.fee_currency,
            Feature::GatewayFee => &mut self.gateway_fee,
            Feature::GatewayFeeRecipient => &mut self.gateway_fee_recipient,
            Feature::RawSubmission => &mut self.raw_submission,
        };
        *slot = value;
        self
    }

    fn from_mask(mask: u8) -> Self {
        Feature::ALL
            .iter()
            .fold(Self::default(), |flags, feature| {
                flags.with(*feature, mask & feature.bit() != 0)
            })
    }

    /// Whether any field only the native encoding can carry is requested.
    pub fn has_celo_only_fields(&self) -> bool {
        self.fee_currency || self.gateway_fee || self.gateway_fee_recipient
    }

    /// Raw eth-compatible transactions have no slot for celo-only fields.
    pub fn is_constructable(&self) -> bool {
        !(self.compat_mode && self.raw_submission && self.has_celo_only_fields())
    }

    /// Names of the enabled features, in generation order.
    pub fn enabled(&self) -> Vec<&'static str> {
        Feature::ALL
            .iter()
            .filter(|feature| self.get(**feature))
            .map(|feature| feature.name())
            .collect()
    }

    /// `Testcase with: ethCompatible, useGatewayFee`
    pub fn label(&self) -> String {
        let enabled = self.enabled();
        if enabled.is_empty() {
            "Testcase with: no options".to_string()
        } else {
            format!("Testcase with: {}", enabled.join(", "))
        }
    }
}

impl fmt::Display for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary: Vec<String> = Feature::ALL
            .iter()
            .map(|feature| format!("{}={}", feature.name(), self.get(*feature)))
            .collect();
        f.write_str(&summary.join(" "))
    }
}

/// A developer filter narrowing the test space: a pinned dimension takes
/// only its pinned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureFilter {
    pub compat_mode: Option<bool>,
    pub contract_creation: Option<bool>,
    pub fee_currency: Option<bool>,
    pub gateway_fee: Option<bool>,
    pub gateway_fee_recipient: Option<bool>,
    pub raw_submission: Option<bool>,
}

impl FeatureFilter {
    /// A filter that pins every dimension to the values of `flags`.
    pub fn exactly(flags: FeatureFlags) -> Self {
        Feature::ALL
            .iter()
            .fold(Self::default(), |filter, feature| {
                filter.pin(*feature, flags.get(*feature))
            })
    }

    pub fn get(&self, feature: Feature) -> Option<bool> {
        match feature {
            Feature::CompatMode => self.compat_mode,
            Feature::ContractCreation => self.contract_creation,
            Feature::FeeCurrency => self.fee_currency,
            Feature::GatewayFee => self.gateway_fee,
            Feature::GatewayFeeRecipient => self.gateway_fee_recipient,
            Feature::RawSubmission => self.raw_submission,
        }
    }

    pub fn pin(self, feature: Feature, value: bool) -> Self {
        self.set(feature, Some(value))
    }

    pub fn set(mut self, feature: Feature, value: Option<bool>) -> Self {
        let slot = match feature {
            Feature::CompatMode => &mut self.compat_mode,
            Feature::ContractCreation => &mut self.contract_creation,
            Feature::FeeCurrency => &mut self.fee_currency,
            Feature::GatewayFee => &mut self.gateway_fee,
            Feature::GatewayFeeRecipient => &mut self.gateway_fee_recipient,
            Feature::RawSubmission => &mut self.raw_submission,
        };
        *slot = value;
        self
    }

    pub fn matches(&self, flags: &FeatureFlags) -> bool {
        Feature::ALL.iter().all(|feature| {
            self.get(*feature)
                .map_or(true, |pinned| pinned == flags.get(*feature))
        })
    }

    pub fn is_empty(&self) -> bool {
        Feature::ALL.iter().all(|feature| self.get(*feature).is_none())
    }
}

/// What a case is expected to do on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Success,
    Failure {
        /// Matched case-insensitively against the node's error message
        error_pattern: &'static str,
        reason: &'static str,
    },
}

impl ExpectedOutcome {
    /// The outcome the acceptance rules prescribe, `None` when the
    /// combination cannot be constructed.
    pub fn for_flags(flags: &FeatureFlags) -> Option<Self> {
        if !flags.is_constructable() {
            return None;
        }
        if flags.compat_mode && flags.has_celo_only_fields() {
            return Some(ExpectedOutcome::Failure {
                error_pattern: INCOMPATIBLE_FIELDS_ERROR,
                reason: INCOMPATIBLE_FIELDS_REASON,
            });
        }
        Some(ExpectedOutcome::Success)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExpectedOutcome::Success)
    }
}

impl fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedOutcome::Success => write!(f, "succeeds"),
            ExpectedOutcome::Failure { reason, .. } => {
                write!(f, "fails with the expected error ({reason})")
            }
        }
    }
}

/// Raised for a combination that no encoding can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unconstructable case ({0}): raw eth-compatible transactions cannot carry celo-only fields")]
pub struct UnconstructableCase(pub FeatureFlags);

/// A combination of features together with its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub flags: FeatureFlags,
    pub expected: ExpectedOutcome,
}

impl TestCase {
    pub fn new(flags: FeatureFlags) -> Result<Self, UnconstructableCase> {
        let expected = ExpectedOutcome::for_flags(&flags).ok_or(UnconstructableCase(flags))?;
        Ok(Self { flags, expected })
    }

    pub fn label(&self) -> String {
        self.flags.label()
    }
}

/// Every constructable combination allowed by `filter`, in lexicographic
/// order over the feature tuple (false before true).
pub fn generate_cases(filter: &FeatureFilter) -> Vec<TestCase> {
    let combinations = 1u8 << Feature::ALL.len();
    let mut cases = Vec::new();
    for mask in 0..combinations {
        let flags = FeatureFlags::from_mask(mask);
        if !filter.matches(&flags) {
            continue;
        }
        match TestCase::new(flags) {
            Ok(case) => cases.push(case),
            Err(excluded) => {
                debug!(target: "donut::cases", %excluded, "combination left out");
            }
        }
    }
    cases
}
