//! Typed feature outcomes
//!
//! A feature either computes a value or reports why it could not. The
//! configured sentinels only appear when an outcome is rendered for output.

use std::fmt;

use crate::FeatureConfig;

/// Result of computing one feature for one applicant
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome<T> {
    /// The feature was computed
    Computed(T),
    /// The applicant has no contract history at all
    NoHistory,
    /// History exists but no contract qualified
    NoQualifying,
    /// The feature could not be computed
    Failed,
}

impl<T> FeatureOutcome<T> {
    /// Get the computed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Computed(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FeatureOutcome<U> {
        match self {
            Self::Computed(v) => FeatureOutcome::Computed(f(v)),
            Self::NoHistory => FeatureOutcome::NoHistory,
            Self::NoQualifying => FeatureOutcome::NoQualifying,
            Self::Failed => FeatureOutcome::Failed,
        }
    }
}

impl<T: fmt::Display> FeatureOutcome<T> {
    /// Render as an output cell, using the numeric sentinels for missing data
    pub fn render(&self, config: &FeatureConfig) -> String {
        match self {
            Self::Computed(v) => v.to_string(),
            Self::NoHistory => config.no_claims.to_string(),
            Self::NoQualifying => config.no_loans.to_string(),
            Self::Failed => config.error.clone(),
        }
    }

    /// Render as an output cell, using one marker for both missing-data cases
    pub fn render_marker(&self, config: &FeatureConfig, marker: &str) -> String {
        match self {
            Self::Computed(v) => v.to_string(),
            Self::NoHistory | Self::NoQualifying => marker.to_string(),
            Self::Failed => config.error.clone(),
        }
    }
}

/// A monetary amount
///
/// Displays in shortest round-trip form with a fractional part (`100.0`,
/// `0.1`). Magnitudes from `1e16` up and below `1e-4` use a signed,
/// two-digit exponent (`1e+16`, `1.5e-05`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(pub f64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return f.write_str("nan");
        }
        let repr = format!("{:?}", self.0);
        match repr.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
                let sign = if exponent < 0 { '-' } else { '+' };
                write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            None => f.write_str(&repr),
        }
    }
}
