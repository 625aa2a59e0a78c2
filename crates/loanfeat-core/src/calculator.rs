//! Feature calculation over one applicant's contract history
//!
//! Five independent features are derived from the contracts and the
//! application date:
//!
//! - **tot_claim_cnt_l180d**: claims inside the lookback window
//! - **disb_bank_loan_wo_tbc**: loan exposure outside the excluded banks
//! - **day_sinlastloan**: days since the latest loan
//! - **most_frequent_bank**: the most common bank
//! - **avg_loan_amount**: mean loan amount
//!
//! A failure inside one feature never leaks into another.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::contract::Contract;
use crate::date::{parse_contract_date, window_start, DateError};
use crate::outcome::{Amount, FeatureOutcome};
use crate::FeatureConfig;

/// Computes features for a single application
pub struct FeatureCalculator<'a> {
    contracts: &'a [Contract],
    application_date: NaiveDate,
    config: &'a FeatureConfig,
}

impl<'a> FeatureCalculator<'a> {
    pub fn new(
        contracts: &'a [Contract],
        application_date: NaiveDate,
        config: &'a FeatureConfig,
    ) -> Self {
        Self {
            contracts,
            application_date,
            config,
        }
    }

    /// Number of claims dated within the lookback window (inclusive)
    pub fn tot_claim_cnt_l180d(&self) -> FeatureOutcome<usize> {
        if self.contracts.is_empty() {
            return FeatureOutcome::NoHistory;
        }

        match self.count_recent_claims() {
            Ok(count) => FeatureOutcome::Computed(count),
            Err(e) => {
                tracing::error!("Error calculating claim count: {}", e);
                FeatureOutcome::Failed
            }
        }
    }

    fn count_recent_claims(&self) -> Result<usize, DateError> {
        let cutoff = window_start(self.application_date, self.config.lookback_days)?;

        let mut count = 0;
        for claim_date in self.contracts.iter().filter_map(Contract::claim_date) {
            let claim_date = parse_contract_date(claim_date)?;
            if cutoff <= claim_date && claim_date <= self.application_date {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Sum of loan exposure over contracts from non-excluded banks
    pub fn disb_bank_loan_wo_tbc(&self) -> FeatureOutcome<Amount> {
        if self.contracts.is_empty() {
            return FeatureOutcome::NoHistory;
        }

        let mut total = 0.0;
        let mut has_loans = false;

        for contract in self.contracts {
            if !self.config.is_valid_bank(contract.bank()) || contract.contract_date().is_none() {
                continue;
            }
            // Counts as a loan even when the amount is unusable
            has_loans = true;
            if let Some(amount) = self.valid_amount(contract.loan_summa()) {
                total += amount;
            }
        }

        if has_loans {
            FeatureOutcome::Computed(Amount(total))
        } else {
            FeatureOutcome::NoQualifying
        }
    }

    /// Days between the latest loan and the application date
    pub fn day_sinlastloan(&self) -> FeatureOutcome<i64> {
        if self.contracts.is_empty() {
            return FeatureOutcome::NoHistory;
        }

        match self.latest_loan_date() {
            Ok(Some(latest)) => {
                FeatureOutcome::Computed((self.application_date - latest).num_days())
            }
            Ok(None) => FeatureOutcome::NoQualifying,
            Err(e) => {
                tracing::error!("Error calculating days since last loan: {}", e);
                FeatureOutcome::Failed
            }
        }
    }

    fn latest_loan_date(&self) -> Result<Option<NaiveDate>, DateError> {
        let mut latest: Option<NaiveDate> = None;
        for contract in self.contracts {
            let (Some(contract_date), Some(_)) = (contract.contract_date(), contract.summa())
            else {
                continue;
            };
            let loan_date = parse_contract_date(contract_date)?;
            if latest.map_or(true, |l| loan_date > l) {
                latest = Some(loan_date);
            }
        }
        Ok(latest)
    }

    /// Most common bank; ties go to the bank seen first
    pub fn most_frequent_bank(&self) -> FeatureOutcome<String> {
        if self.contracts.is_empty() {
            return FeatureOutcome::NoHistory;
        }

        // bank -> (count, first position)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, bank) in self.contracts.iter().filter_map(Contract::bank).enumerate() {
            counts.entry(bank).or_insert((0, position)).0 += 1;
        }

        counts
            .into_iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(bank, _)| FeatureOutcome::Computed(bank.to_string()))
            .unwrap_or(FeatureOutcome::NoQualifying)
    }

    /// Mean of valid loan amounts
    pub fn avg_loan_amount(&self) -> FeatureOutcome<Amount> {
        if self.contracts.is_empty() {
            return FeatureOutcome::NoHistory;
        }

        let amounts: Vec<f64> = self
            .contracts
            .iter()
            .filter_map(|c| self.valid_amount(c.summa()))
            .collect();

        if amounts.is_empty() {
            return FeatureOutcome::NoQualifying;
        }
        let sum: f64 = amounts.iter().sum();
        FeatureOutcome::Computed(Amount(sum / amounts.len() as f64))
    }

    /// Parse an amount, keeping it only if it passes the minimum check.
    /// Malformed values are expected noise and are not logged.
    fn valid_amount(&self, raw: Option<&str>) -> Option<f64> {
        raw.and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|&amount| self.config.is_valid_amount(amount))
    }
}
