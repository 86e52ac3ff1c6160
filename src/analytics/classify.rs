//! Error categorization and deviation bucketing.
//!
//! Both classifiers are total: every input maps to exactly one label.

use serde::{Deserialize, Serialize};

use super::normalize::RawAmount;

/// Failure category for a record that did not verify.
///
/// Variant order is the precedence order used by [`classify_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    ZeroAmount,
    VmExecutionError,
    NegativeOutputDelta,
    SolverCalculationFailed,
    Other,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::ZeroAmount => "Zero-amount swap",
            ErrorCategory::VmExecutionError => "VM execution error",
            ErrorCategory::NegativeOutputDelta => "Negative output delta",
            ErrorCategory::SolverCalculationFailed => "Solver calculation failed",
            ErrorCategory::Other => "Other error",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const VM_EXECUTION_MARKER: &str = "VM execution error";
const NEGATIVE_DELTA_MARKER: &str = "negative output delta";
const SOLVER_FAILED_MARKER: &str = "Swap failed in solver";

/// Classify a failed record. First match wins:
/// zero amount, VM error, negative output delta, solver failure, other.
///
/// A zero-amount record is `ZeroAmount` even when its text names a VM error.
pub fn classify_error(error_text: Option<&str>, amount_in: Option<&RawAmount>) -> ErrorCategory {
    if amount_in.is_some_and(RawAmount::is_zero) {
        return ErrorCategory::ZeroAmount;
    }
    let text = error_text.unwrap_or("");
    if text.contains(VM_EXECUTION_MARKER) {
        ErrorCategory::VmExecutionError
    } else if text.contains(NEGATIVE_DELTA_MARKER) {
        ErrorCategory::NegativeOutputDelta
    } else if text.contains(SOLVER_FAILED_MARKER) {
        ErrorCategory::SolverCalculationFailed
    } else {
        ErrorCategory::Other
    }
}

/// Magnitude bucket for a deviation in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationBucket {
    Perfect,
    Within1,
    Within10,
    Within100,
    Over100,
}

/// Bucket `|deviation|`. Upper edges are inclusive: exactly 1.0 is `Within1`.
pub fn bucket_deviation(deviation_bps: f64) -> DeviationBucket {
    let magnitude = deviation_bps.abs();
    if magnitude == 0.0 {
        DeviationBucket::Perfect
    } else if magnitude <= 1.0 {
        DeviationBucket::Within1
    } else if magnitude <= 10.0 {
        DeviationBucket::Within10
    } else if magnitude <= 100.0 {
        DeviationBucket::Within100
    } else {
        DeviationBucket::Over100
    }
}

/// Coarse grade for a group, used as a headline next to its figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Perfect,
    Excellent,
    Good,
    Moderate,
    Problematic,
}

impl QualityTier {
    /// Rates are percentages in `[0, 100]`.
    pub fn from_rates(total: u64, success_rate_pct: f64, perfect_rate_pct: f64) -> Self {
        if total == 0 {
            QualityTier::Problematic
        } else if perfect_rate_pct >= 99.0 {
            QualityTier::Perfect
        } else if success_rate_pct >= 95.0 {
            QualityTier::Excellent
        } else if success_rate_pct >= 85.0 {
            QualityTier::Good
        } else if success_rate_pct >= 70.0 {
            QualityTier::Moderate
        } else {
            QualityTier::Problematic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalize::parse_amount;

    fn amount(text: &str) -> RawAmount {
        RawAmount {
            text: text.to_string(),
            value: parse_amount(text).unwrap(),
        }
    }

    #[test]
    fn test_zero_amount_takes_precedence() {
        let zero = amount("0");
        assert_eq!(
            classify_error(Some("VM execution error: revert"), Some(&zero)),
            ErrorCategory::ZeroAmount
        );
        assert_eq!(
            classify_error(None, Some(&amount("0x0"))),
            ErrorCategory::ZeroAmount
        );
    }

    #[test]
    fn test_text_precedence() {
        let one = amount("1");
        assert_eq!(
            classify_error(
                Some("VM execution error after negative output delta"),
                Some(&one)
            ),
            ErrorCategory::VmExecutionError
        );
        assert_eq!(
            classify_error(Some("negative output delta; Swap failed in solver"), None),
            ErrorCategory::NegativeOutputDelta
        );
        assert_eq!(
            classify_error(Some("Swap failed in solver: overflow"), None),
            ErrorCategory::SolverCalculationFailed
        );
        assert_eq!(classify_error(Some("timeout"), None), ErrorCategory::Other);
        assert_eq!(classify_error(None, None), ErrorCategory::Other);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(
            classify_error(Some("vm execution error"), None),
            ErrorCategory::Other
        );
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket_deviation(0.0), DeviationBucket::Perfect);
        assert_eq!(bucket_deviation(-0.0), DeviationBucket::Perfect);
        assert_eq!(bucket_deviation(0.5), DeviationBucket::Within1);
        assert_eq!(bucket_deviation(1.0), DeviationBucket::Within1);
        assert_eq!(bucket_deviation(1.0001), DeviationBucket::Within10);
        assert_eq!(bucket_deviation(10.0), DeviationBucket::Within10);
        assert_eq!(bucket_deviation(100.0), DeviationBucket::Within100);
        assert_eq!(bucket_deviation(100.01), DeviationBucket::Over100);
        assert_eq!(bucket_deviation(-100.01), DeviationBucket::Over100);
        assert_eq!(bucket_deviation(-1.0), DeviationBucket::Within1);
    }

    #[test]
    fn test_quality_tier() {
        assert_eq!(QualityTier::from_rates(10, 100.0, 99.5), QualityTier::Perfect);
        assert_eq!(QualityTier::from_rates(10, 96.0, 50.0), QualityTier::Excellent);
        assert_eq!(QualityTier::from_rates(10, 85.0, 0.0), QualityTier::Good);
        assert_eq!(QualityTier::from_rates(10, 70.0, 0.0), QualityTier::Moderate);
        assert_eq!(QualityTier::from_rates(10, 69.9, 0.0), QualityTier::Problematic);
        assert_eq!(QualityTier::from_rates(0, 0.0, 0.0), QualityTier::Problematic);
    }
}
