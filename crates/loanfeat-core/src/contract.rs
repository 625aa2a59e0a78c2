//! Contract records and the contracts payload parser.
//!
//! The `contracts` column holds JSON: a single object, an array of objects,
//! or junk. Undecodable JSON degrades to an empty history. An array that
//! decodes but holds something other than objects is corrupt history and
//! is reported as a `ContractError`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// One historical loan or claim entry.
///
/// Every field is optional. Falsy JSON (`null`, `""`, `0`, `false`, empty
/// arrays and objects) is read as absent; other values keep their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Contract {
    #[serde(default, deserialize_with = "lenient_text")]
    pub claim_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bank: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub loan_summa: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contract_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summa: Option<String>,
}

/// Ordered contract history of one applicant.
pub type Contracts = Vec<Contract>;

impl Contract {
    pub fn claim_date(&self) -> Option<&str> {
        self.claim_date.as_deref()
    }

    pub fn bank(&self) -> Option<&str> {
        self.bank.as_deref()
    }

    pub fn loan_summa(&self) -> Option<&str> {
        self.loan_summa.as_deref()
    }

    pub fn contract_date(&self) -> Option<&str> {
        self.contract_date.as_deref()
    }

    pub fn summa(&self) -> Option<&str> {
        self.summa.as_deref()
    }
}

/// A decoded payload that does not describe contracts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("contract #{index} is not a JSON object: {value}")]
    NotAnObject { index: usize, value: String },

    #[error("contract #{index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    })
}

/// Parse the raw `contracts` cell of one application.
///
/// - missing, null or blank → empty
/// - invalid JSON → logged, empty
/// - an object → one contract
/// - an array of objects → those contracts, in order
/// - an array with any non-object element → `ContractError`
/// - any other JSON value → empty
pub fn parse_contracts(raw: Option<&str>) -> Result<Contracts, ContractError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(Vec::new()),
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to parse contracts json: {}", e);
            return Ok(Vec::new());
        }
    };

    match value {
        Value::Object(_) => Ok(vec![contract_from_value(value, 0)?]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| contract_from_value(item, index))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn contract_from_value(value: Value, index: usize) -> Result<Contract, ContractError> {
    if !value.is_object() {
        return Err(ContractError::NotAnObject {
            index,
            value: value.to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| ContractError::Malformed {
        index,
        reason: e.to_string(),
    })
}
