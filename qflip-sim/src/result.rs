//! Result records returned by the service
//!
//! Field names match the JSON payloads served to clients.

use crate::scenario::{coin_face, Basis, BellState, MeasurementState, OutcomeLabels};
use crate::statistics::{round2, BatchSummary};
use qflip_state::{Outcome, OutcomeDistribution};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Theoretical percentage of each single-coin face
pub const COIN_THEORETICAL_PERCENTAGE: f64 = 50.0;

/// Theoretical percentage of each double-coin outcome
pub const DOUBLE_COIN_THEORETICAL_PERCENTAGE: f64 = 25.0;

/// Percentages of a theoretical distribution keyed by bitstring
pub fn expected_percentages(distribution: &OutcomeDistribution) -> BTreeMap<String, f64> {
    distribution
        .iter()
        .map(|(outcome, p)| (outcome.to_string(), round2(p * 100.0)))
        .collect()
}

/// One single-coin flip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinFlip {
    /// 0 for Heads, 1 for Tails
    pub result: u8,
    pub result_label: &'static str,
}

impl CoinFlip {
    pub fn new(outcome: &Outcome) -> Self {
        let result = outcome.qubit(0);
        Self {
            result,
            result_label: coin_face(result),
        }
    }
}

impl fmt::Display for CoinFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.result_label, self.result)
    }
}

/// A batch of single-coin flips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinFlipBatch {
    pub total_shots: usize,
    pub zeros: usize,
    pub ones: usize,
    pub zero_percentage: f64,
    pub one_percentage: f64,
    pub theoretical_probability: f64,
}

impl CoinFlipBatch {
    pub fn from_summary(summary: &BatchSummary) -> Self {
        Self {
            total_shots: summary.total_shots,
            zeros: summary.count("0"),
            ones: summary.count("1"),
            zero_percentage: summary.percentage("0"),
            one_percentage: summary.percentage("1"),
            theoretical_probability: COIN_THEORETICAL_PERCENTAGE,
        }
    }
}

/// One flip of two independent coins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleCoinFlip {
    /// Both coins, first coin first, e.g. `"01"`
    pub result: String,
    pub coin1: u8,
    pub coin2: u8,
    pub coin1_label: &'static str,
    pub coin2_label: &'static str,
}

impl DoubleCoinFlip {
    pub fn new(outcome: &Outcome) -> Self {
        let (coin1, coin2) = (outcome.qubit(0), outcome.qubit(1));
        Self {
            result: outcome.to_string(),
            coin1,
            coin2,
            coin1_label: coin_face(coin1),
            coin2_label: coin_face(coin2),
        }
    }
}

/// A batch of double-coin flips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleCoinFlipBatch {
    pub total_shots: usize,
    pub counts: BTreeMap<String, usize>,
    pub percentages: BTreeMap<String, f64>,
    pub labels: BTreeMap<String, String>,
    pub theoretical_probability: f64,
}

impl DoubleCoinFlipBatch {
    pub fn new(summary: BatchSummary, labels: &OutcomeLabels) -> Self {
        Self {
            total_shots: summary.total_shots,
            counts: summary.counts,
            percentages: summary.percentages,
            labels: labels.to_map(),
            theoretical_probability: DOUBLE_COIN_THEORETICAL_PERCENTAGE,
        }
    }
}

/// One measurement of a Bell pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BellMeasurement {
    pub result: String,
    pub qubit1: u8,
    pub qubit2: u8,
    pub state: BellState,
    pub description: &'static str,
}

impl BellMeasurement {
    pub fn new(state: BellState, outcome: &Outcome) -> Self {
        Self {
            result: outcome.to_string(),
            qubit1: outcome.qubit(0),
            qubit2: outcome.qubit(1),
            state,
            description: state.description(),
        }
    }

    /// Whether both qubits were measured equal
    pub fn agrees(&self) -> bool {
        self.qubit1 == self.qubit2
    }
}

/// A batch of Bell-pair measurements with the theoretical percentages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BellBatch {
    pub total_measurements: usize,
    pub counts: BTreeMap<String, usize>,
    pub percentages: BTreeMap<String, f64>,
    pub state: BellState,
    pub expected: BTreeMap<String, f64>,
}

impl BellBatch {
    pub fn new(state: BellState, summary: BatchSummary, expected: &OutcomeDistribution) -> Self {
        Self {
            total_measurements: summary.total_shots,
            counts: summary.counts,
            percentages: summary.percentages,
            state,
            expected: expected_percentages(expected),
        }
    }
}

/// One measurement of a demo state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementOutcome {
    pub result: u8,
    pub state: MeasurementState,
    pub basis: Basis,
    /// Theoretical probability of the observed result
    pub probability: f64,
}

impl MeasurementOutcome {
    pub fn new(
        state: MeasurementState,
        basis: Basis,
        outcome: &Outcome,
        distribution: &OutcomeDistribution,
    ) -> Self {
        Self {
            result: outcome.qubit(0),
            state,
            basis,
            probability: distribution.probability(outcome),
        }
    }
}

/// A batch of demo-state measurements with the theoretical percentages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementBatch {
    pub total_shots: usize,
    pub state: MeasurementState,
    pub basis: Basis,
    pub counts: BTreeMap<String, usize>,
    pub percentages: BTreeMap<String, f64>,
    pub expected: BTreeMap<String, f64>,
}

impl MeasurementBatch {
    pub fn new(
        state: MeasurementState,
        basis: Basis,
        summary: BatchSummary,
        expected: &OutcomeDistribution,
    ) -> Self {
        Self {
            total_shots: summary.total_shots,
            state,
            basis,
            counts: summary.counts,
            percentages: summary.percentages,
            expected: expected_percentages(expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::summarize;
    use qflip_state::BatchResult;
    use serde_json::json;

    fn summary(num_qubits: usize, bits: &[&str]) -> BatchSummary {
        let outcomes: Vec<Outcome> = bits.iter().map(|b| b.parse().unwrap()).collect();
        let batch = BatchResult::from_outcomes(num_qubits, &outcomes).unwrap();
        summarize(&batch, bits.len()).unwrap()
    }

    #[test]
    fn test_coin_flip_labels() {
        let tails = CoinFlip::new(&"1".parse::<Outcome>().unwrap());
        assert_eq!(tails.result_label, "Tails");
        assert_eq!(tails.to_string(), "Tails (1)");
    }

    #[test]
    fn test_coin_flip_batch_fields() {
        let batch = CoinFlipBatch::from_summary(&summary(1, &["0", "0", "0", "1"]));
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({
                "total_shots": 4,
                "zeros": 3,
                "ones": 1,
                "zero_percentage": 75.0,
                "one_percentage": 25.0,
                "theoretical_probability": 50.0
            })
        );
    }

    #[test]
    fn test_double_coin_flip_breakdown() {
        let flip = DoubleCoinFlip::new(&"01".parse::<Outcome>().unwrap());
        assert_eq!(flip.result, "01");
        assert_eq!((flip.coin1, flip.coin2), (0, 1));
        assert_eq!((flip.coin1_label, flip.coin2_label), ("Heads", "Tails"));
    }

    #[test]
    fn test_bell_batch_expected() {
        let expected = BellState::PsiMinus.expected_distribution().unwrap();
        let batch = BellBatch::new(BellState::PsiMinus, summary(2, &["01", "10"]), &expected);

        assert_eq!(batch.total_measurements, 2);
        assert_eq!(batch.expected["01"], 50.0);
        assert_eq!(batch.expected["00"], 0.0);

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["state"], "psi_minus");
        assert_eq!(value["counts"]["11"], 0);
    }

    #[test]
    fn test_bell_measurement_agreement() {
        let m = BellMeasurement::new(BellState::PhiPlus, &"11".parse::<Outcome>().unwrap());
        assert!(m.agrees());
        assert!(m.description.contains("|11⟩"));
    }

    #[test]
    fn test_measurement_outcome_probability() {
        let dist = MeasurementState::Biased1.expected_distribution(Basis::Z).unwrap();
        let outcome = MeasurementOutcome::new(
            MeasurementState::Biased1,
            Basis::Z,
            &"1".parse::<Outcome>().unwrap(),
            &dist,
        );
        assert!((outcome.probability - 0.75).abs() < 1e-12);
        assert_eq!(serde_json::to_value(&outcome).unwrap()["basis"], "z");
    }
}
