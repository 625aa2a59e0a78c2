//! Business-rule configuration for feature calculation
//!
//! A single `FeatureConfig` is built at startup (defaults, or loaded from a
//! TOML/JSON file) and then shared by reference across every row.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Banks whose loans never count toward exposure.
pub const DEFAULT_EXCLUDED_BANKS: [&str; 4] = ["LIZ", "LOM", "MKO", "SUG"];

/// Business-rule parameters and output sentinels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Bank identifiers excluded from exposure calculations
    pub excluded_banks: BTreeSet<String>,
    /// Length of the claim lookback window in days
    pub lookback_days: u32,
    /// Sentinel written when an applicant has no contract history
    pub no_claims: i64,
    /// Sentinel written when history exists but no contract qualifies
    pub no_loans: i64,
    /// Marker written when a feature could not be computed
    pub error: String,
    /// Marker written for `most_frequent_bank` when no bank is known
    pub no_bank: String,
    /// Smallest amount accepted into sums and averages
    pub min_valid_amount: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            excluded_banks: DEFAULT_EXCLUDED_BANKS
                .iter()
                .map(|b| b.to_string())
                .collect(),
            lookback_days: 180,
            no_claims: -3,
            no_loans: -1,
            error: "ERROR".to_string(),
            no_bank: "NONE".to_string(),
            min_valid_amount: 0.0,
        }
    }
}

impl FeatureConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days == 0 {
            return Err(ConfigError::OutOfRange(
                "lookback_days must be positive".to_string(),
            ));
        }

        // "no history" and "no loans" must stay distinguishable in output
        if self.no_claims == self.no_loans {
            return Err(ConfigError::AmbiguousSentinels(format!(
                "no_claims and no_loans are both {}",
                self.no_claims
            )));
        }

        if self.error.is_empty() {
            return Err(ConfigError::MissingField("error".to_string()));
        }
        if self.no_bank.is_empty() {
            return Err(ConfigError::MissingField("no_bank".to_string()));
        }

        if !self.min_valid_amount.is_finite() {
            return Err(ConfigError::OutOfRange(
                "min_valid_amount must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// A bank is valid when present, non-empty and not excluded
    pub fn is_valid_bank(&self, bank: Option<&str>) -> bool {
        match bank {
            Some(b) => !b.is_empty() && !self.excluded_banks.contains(b),
            None => false,
        }
    }

    /// NaN never passes.
    pub fn is_valid_amount(&self, amount: f64) -> bool {
        amount >= self.min_valid_amount
    }
}

/// Configuration loading or validation error
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Ambiguous sentinels: {0}")]
    AmbiguousSentinels(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeatureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lookback_days, 180);
        assert_eq!(config.excluded_banks.len(), 4);
    }

    #[test]
    fn test_is_valid_bank() {
        let config = FeatureConfig::default();
        assert!(config.is_valid_bank(Some("ABC")));
        assert!(!config.is_valid_bank(Some("LIZ")));
        assert!(!config.is_valid_bank(Some("SUG")));
        assert!(!config.is_valid_bank(Some("")));
        assert!(!config.is_valid_bank(None));
    }

    #[test]
    fn test_is_valid_amount() {
        let config = FeatureConfig::default();
        assert!(config.is_valid_amount(0.0));
        assert!(config.is_valid_amount(150.5));
        assert!(!config.is_valid_amount(-0.01));
        assert!(!config.is_valid_amount(f64::NAN));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FeatureConfig::from_toml("lookback_days = 90\n").unwrap();
        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.no_claims, -3);
        assert!(config.excluded_banks.contains("MKO"));
    }

    #[test]
    fn test_toml_excluded_banks() {
        let config = FeatureConfig::from_toml("excluded_banks = [\"TBC\"]\n").unwrap();
        assert!(config.is_valid_bank(Some("LIZ")));
        assert!(!config.is_valid_bank(Some("TBC")));
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = FeatureConfig::default();
        config.lookback_days = 365;
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("lookback_days = 365"));
        assert_eq!(FeatureConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_json_serialization() {
        let config = FeatureConfig::default();
        let json = config.to_json().unwrap();
        let parsed = FeatureConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let mut config = FeatureConfig::default();
        config.lookback_days = 0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }

    #[test]
    fn test_equal_sentinels_rejected() {
        let mut config = FeatureConfig::default();
        config.no_loans = config.no_claims;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AmbiguousSentinels(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            FeatureConfig::from_toml("lookback_days = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
