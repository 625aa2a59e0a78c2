//! Shared helpers for feature integration tests

use chrono::NaiveDate;
use loanfeat_core::{parse_contracts, FeatureCalculator, FeatureConfig, Features};

/// Parse a `YYYY-MM-DD` test date
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| panic!("bad test date: {}", s))
}

/// Compute all features for a JSON payload and ISO application date
pub fn features_for(payload: &str, application_date: &str, config: &FeatureConfig) -> Features {
    let contracts = parse_contracts(Some(payload)).expect("payload holds only objects");
    let calculator = FeatureCalculator::new(&contracts, date(application_date), config);
    Features::compute(&calculator)
}
