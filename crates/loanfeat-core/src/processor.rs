//! Row-level orchestration
//!
//! Turns one application row into one feature row. Data problems inside a
//! row never abort the batch: they degrade to failed outcomes and a log line.

use serde::Deserialize;

use crate::calculator::FeatureCalculator;
use crate::contract::parse_contracts;
use crate::date::parse_application_date;
use crate::outcome::{Amount, FeatureOutcome};
use crate::FeatureConfig;

/// Output column names, in order
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "id",
    "application_date",
    "tot_claim_cnt_l180d",
    "disb_bank_loan_wo_tbc",
    "day_sinlastloan",
    "most_frequent_bank",
    "avg_loan_amount",
];

/// One input application
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub application_date: Option<String>,
    #[serde(default)]
    pub contracts: Option<String>,
}

/// The five features of one application
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub tot_claim_cnt_l180d: FeatureOutcome<usize>,
    pub disb_bank_loan_wo_tbc: FeatureOutcome<Amount>,
    pub day_sinlastloan: FeatureOutcome<i64>,
    pub most_frequent_bank: FeatureOutcome<String>,
    pub avg_loan_amount: FeatureOutcome<Amount>,
}

impl Features {
    /// Evaluate every feature of a calculator
    pub fn compute(calculator: &FeatureCalculator<'_>) -> Self {
        Self {
            tot_claim_cnt_l180d: calculator.tot_claim_cnt_l180d(),
            disb_bank_loan_wo_tbc: calculator.disb_bank_loan_wo_tbc(),
            day_sinlastloan: calculator.day_sinlastloan(),
            most_frequent_bank: calculator.most_frequent_bank(),
            avg_loan_amount: calculator.avg_loan_amount(),
        }
    }

    /// All five features failed
    pub fn failed() -> Self {
        Self {
            tot_claim_cnt_l180d: FeatureOutcome::Failed,
            disb_bank_loan_wo_tbc: FeatureOutcome::Failed,
            day_sinlastloan: FeatureOutcome::Failed,
            most_frequent_bank: FeatureOutcome::Failed,
            avg_loan_amount: FeatureOutcome::Failed,
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: Option<String>,
    pub application_date: Option<String>,
    pub features: Features,
}

impl FeatureRow {
    /// Render the row as output cells, in `OUTPUT_COLUMNS` order
    pub fn to_cells(&self, config: &FeatureConfig) -> [String; 7] {
        let f = &self.features;
        [
            self.id.clone().unwrap_or_default(),
            self.application_date.clone().unwrap_or_default(),
            f.tot_claim_cnt_l180d.render(config),
            f.disb_bank_loan_wo_tbc.render(config),
            f.day_sinlastloan.render(config),
            f.most_frequent_bank.render_marker(config, &config.no_bank),
            f.avg_loan_amount.render(config),
        ]
    }
}

/// Applies parser and calculator to application rows
pub struct ContractProcessor<'a> {
    config: &'a FeatureConfig,
}

impl<'a> ContractProcessor<'a> {
    pub fn new(config: &'a FeatureConfig) -> Self {
        Self { config }
    }

    /// Calculate features for a single row
    ///
    /// Corrupt contract history, or a missing or unparseable application
    /// date, fails all five features.
    pub fn calculate_features(&self, row: &ApplicationRow) -> Features {
        let inputs = parse_contracts(row.contracts.as_deref())
            .map_err(|e| e.to_string())
            .and_then(|contracts| {
                let date = match row.application_date.as_deref() {
                    Some(raw) => parse_application_date(raw).map_err(|e| e.to_string())?,
                    None => return Err("missing application_date".to_string()),
                };
                Ok((contracts, date))
            });

        match inputs {
            Ok((contracts, date)) => {
                let calculator = FeatureCalculator::new(&contracts, date, self.config);
                Features::compute(&calculator)
            }
            Err(e) => {
                tracing::error!(
                    "Error calculating features for id {}: {}",
                    row.id.as_deref().unwrap_or("unknown"),
                    e
                );
                Features::failed()
            }
        }
    }

    /// Process a batch of rows, preserving order
    pub fn process_rows(&self, rows: &[ApplicationRow]) -> Vec<FeatureRow> {
        let output: Vec<FeatureRow> = rows
            .iter()
            .map(|row| {
                tracing::debug!("Processing id {}", row.id.as_deref().unwrap_or("unknown"));
                FeatureRow {
                    id: row.id.clone(),
                    application_date: row.application_date.clone(),
                    features: self.calculate_features(row),
                }
            })
            .collect();

        tracing::info!("Successfully processed {} rows", rows.len());
        output
    }
}
