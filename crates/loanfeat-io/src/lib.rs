//! loanfeat-io - CSV exchange for loanfeat
//!
//! - **reader**: loads application rows (`id`, `application_date`,
//!   `contracts`) from a CSV file with a header
//! - **writer**: saves feature rows, rendering outcomes with the configured
//!   sentinels
//!
//! Everything is loaded before processing and written after it; there is no
//! streaming.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::*;
pub use reader::*;
pub use writer::*;
