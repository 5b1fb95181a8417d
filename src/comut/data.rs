//! Co-occurrence data document.
//!
//! The document lists samples, the set of column names, and a per-sample
//! record of column values. The reserved sample [`SUMMARY_SAMPLE`] carries
//! per-column summary statistics (q-values) and is never plotted as a
//! sample.

use crate::error::Result;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Sample id of the summary row.
pub const SUMMARY_SAMPLE: &str = "all_q";

/// Samples, column names and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDocument {
    /// Sample ids in file order.
    pub samples: Vec<String>,
    /// Column names in file order.
    pub sets: Vec<String>,
    /// Values by sample id, then column name. Nulls are kept as `None`.
    pub data: HashMap<String, HashMap<String, Option<Value>>>,
}

impl DataDocument {
    /// Read a JSON document.
    ///
    /// # Errors
    ///
    /// Returns I/O and JSON errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Plottable samples: every sample except the summary row.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(String::as_str).filter(|s| *s != SUMMARY_SAMPLE)
    }

    /// Columns whose name contains `search`, in file order.
    #[must_use]
    pub fn columns(&self, search: &str) -> Vec<&str> {
        self.sets.iter().map(String::as_str).filter(|c| c.contains(search)).collect()
    }

    /// Value of `column` for `sample`.
    #[must_use]
    pub fn get(&self, sample: &str, column: &str) -> Option<&Value> {
        self.data.get(sample)?.get(column)?.as_ref()
    }

    /// Numeric value of `column` for `sample`.
    #[must_use]
    pub fn number(&self, sample: &str, column: &str) -> Option<f64> {
        self.get(sample, column).and_then(Value::as_f64)
    }

    /// Summary (q-value) of `column`.
    #[must_use]
    pub fn summary(&self, column: &str) -> Option<f64> {
        self.number(SUMMARY_SAMPLE, column)
    }

    /// Value `sample` is sorted on for a search discriminator.
    ///
    /// One matching column gives its value (0 when absent); several give the
    /// sum of their numeric values.
    #[must_use]
    pub fn sort_value(&self, sample: &str, search: &str) -> Value {
        let columns = self.columns(search);
        match columns.as_slice() {
            [column] => self.get(sample, column).cloned().unwrap_or(Value::Number(0.0)),
            _ => Value::Number(columns.iter().filter_map(|c| self.number(sample, c)).sum()),
        }
    }
}

/// Per-panel value transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// `-log10(v)`, for q-values.
    NegLog10,
    /// Per-base rate to per-megabase; absent counts as 0.
    PerMegabase,
    /// Absent counts as 0.
    ZeroFill,
    /// 0 and absent both mean "no value".
    Presence,
    /// Unchanged.
    Identity,
}

impl Transform {
    /// Transform applied to a panel's values, keyed by panel id.
    #[must_use]
    pub fn for_panel(id: &str) -> Self {
        match id {
            "Q" => Transform::NegLog10,
            "MutationRate" => Transform::PerMegabase,
            "MutationSignature" => Transform::ZeroFill,
            "GeneMutation" | "CopyNumberGain" => Transform::Presence,
            _ => Transform::Identity,
        }
    }

    /// Apply to a raw value. Text and timestamps pass through.
    #[must_use]
    pub fn apply(self, value: Option<&Value>) -> Option<Value> {
        let n = match value {
            Some(Value::Number(n)) => Some(*n),
            Some(other) => return Some(other.clone()),
            None => None,
        };
        let out = match (self, n) {
            (Transform::NegLog10, Some(n)) => Some(-n.log10()),
            (Transform::PerMegabase, n) => Some(n.unwrap_or(0.0) * 1e6),
            (Transform::ZeroFill, n) => Some(n.unwrap_or(0.0)),
            (Transform::Presence, Some(n)) if n != 0.0 => Some(n),
            (Transform::Identity, n) => n,
            (Transform::NegLog10 | Transform::Presence, _) => None,
        };
        out.map(Value::Number)
    }

    /// Apply to a bare number.
    #[must_use]
    pub fn number(self, n: f64) -> Option<f64> {
        self.apply(Some(&Value::Number(n))).and_then(|v| v.as_f64())
    }
}
