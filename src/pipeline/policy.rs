//! Zero-division policy selection.

use crate::error::DatadocError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How non-finite quotients are represented in the derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroDivisionPolicy {
    /// Replace every non-finite quotient (NaN, +inf, -inf) with a missing value
    #[default]
    Nan,

    /// Keep IEEE-754 results as they are: `x/0` is a signed infinity, `0/0` is NaN
    Inf,

    /// Refuse to divide when any denominator is exactly zero
    Raise,
}

impl ZeroDivisionPolicy {
    /// Every accepted spelling, in the order shown to users.
    pub const ALL: [Self; 3] = [Self::Nan, Self::Inf, Self::Raise];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nan => "nan",
            Self::Inf => "inf",
            Self::Raise => "raise",
        }
    }

    /// Divide one pair of operands. A missing operand yields a missing quotient.
    pub fn divide(self, numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
        let quotient = numerator? / denominator?;
        match self {
            Self::Nan => quotient.is_finite().then_some(quotient),
            Self::Inf | Self::Raise => Some(quotient),
        }
    }
}

impl fmt::Display for ZeroDivisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZeroDivisionPolicy {
    type Err = DatadocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| {
                DatadocError::InvalidArgument(format!(
                    "zero-division policy must be 'nan', 'inf' or 'raise', got '{s}'"
                ))
            })
    }
}
