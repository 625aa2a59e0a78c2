//! loanfeat-core: contract parsing and credit-risk feature calculation.
//!
//! Each application carries its contract history as embedded JSON. This
//! crate turns that payload into typed `Contract` records and derives five
//! features from them relative to the application date.
//!
//! # Pipeline
//!
//! 1. [`parse_contracts`] decodes the raw payload; bad JSON is an empty
//!    history, non-object array elements are a [`ContractError`]
//! 2. [`FeatureCalculator`] computes each feature as a [`FeatureOutcome`]
//! 3. [`ContractProcessor`] runs both per row and applies the row-level
//!    error policy (corrupt history or a bad application date fails all
//!    five features)
//!
//! Sentinel values (`-3`, `-1`, `ERROR`, `NONE` by default) come from
//! [`FeatureConfig`] and are only applied when rendering output cells.

pub mod calculator;
pub mod config;
pub mod contract;
pub mod date;
pub mod outcome;
pub mod processor;

pub use calculator::*;
pub use config::*;
pub use contract::*;
pub use date::*;
pub use outcome::*;
pub use processor::*;
