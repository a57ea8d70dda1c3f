//! Batch statistics aggregation

use crate::error::{Result, SimulatorError};
use qflip_state::{BatchResult, Outcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Round a value to two decimal places
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `count` in `total`, rounded to two decimals
///
/// Returns 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Counts and percentages of a sampled batch, keyed by bitstring
///
/// Every outcome of the register is present, unseen ones with a zero count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Shots the percentages are relative to
    pub total_shots: usize,

    /// Observed count per outcome
    pub counts: BTreeMap<String, usize>,

    /// `round(count / total_shots * 100, 2)` per outcome
    pub percentages: BTreeMap<String, f64>,
}

impl BatchSummary {
    /// Count for a bitstring, 0 if it is not an outcome of the register
    pub fn count(&self, bits: &str) -> usize {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    /// Percentage for a bitstring, 0 if it is not an outcome of the register
    pub fn percentage(&self, bits: &str) -> f64 {
        self.percentages.get(bits).copied().unwrap_or(0.0)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch of {} shots:", self.total_shots)?;
        for (bits, count) in &self.counts {
            writeln!(f, "  {}: {} ({:.2}%)", bits, count, self.percentage(bits))?;
        }
        Ok(())
    }
}

/// Summarize a batch relative to `total_shots`
///
/// # Errors
///
/// Returns [`SimulatorError::InvalidShotCount`] if `total_shots` is 0.
pub fn summarize(batch: &BatchResult, total_shots: usize) -> Result<BatchSummary> {
    if total_shots == 0 {
        return Err(SimulatorError::InvalidShotCount { shots: total_shots });
    }

    let mut counts = BTreeMap::new();
    let mut percentages = BTreeMap::new();
    for outcome in Outcome::all(batch.num_qubits()) {
        let bits = outcome.to_string();
        let count = batch.count(&outcome);
        percentages.insert(bits.clone(), percentage(count, total_shots));
        counts.insert(bits, count);
    }

    debug!(total_shots, ?counts, "batch summarized");
    Ok(BatchSummary {
        total_shots,
        counts,
        percentages,
    })
}
