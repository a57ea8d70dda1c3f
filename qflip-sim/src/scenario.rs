//! Demonstration circuits
//!
//! Every builder returns a [`ScenarioCircuit`]: the circuit that prepares the
//! state plus the human-facing label of each outcome. Outcomes are always
//! displayed qubit 0 first, while amplitudes are indexed with qubit 0 as the
//! least-significant bit; [`OutcomeLabels`] is the single place that maps one
//! to the other.

use crate::error::{Result, SimulatorError};
use qflip_core::{Circuit, QubitId};
use qflip_state::{Outcome, OutcomeDistribution, NORMALIZATION_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

const Q0: QubitId = QubitId::new(0);
const Q1: QubitId = QubitId::new(1);

/// Label of every outcome of a register, in basis-index order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeLabels {
    num_qubits: usize,
    labels: Vec<String>,
}

impl OutcomeLabels {
    /// Label each outcome with `label`
    pub fn from_fn(num_qubits: usize, label: impl Fn(&Outcome) -> String) -> Self {
        Self {
            num_qubits,
            labels: Outcome::all(num_qubits).map(|o| label(&o)).collect(),
        }
    }

    /// Label each outcome with its own bitstring
    pub fn bitstrings(num_qubits: usize) -> Self {
        Self::from_fn(num_qubits, Outcome::to_string)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Label of one outcome
    pub fn label(&self, outcome: &Outcome) -> &str {
        self.labels
            .get(outcome.index())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Labels keyed by bitstring
    pub fn to_map(&self) -> BTreeMap<String, String> {
        Outcome::all(self.num_qubits)
            .zip(self.labels.iter().cloned())
            .map(|(o, label)| (o.to_string(), label))
            .collect()
    }
}

/// A state-preparation circuit with outcome labels
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCircuit {
    circuit: Circuit,
    labels: OutcomeLabels,
}

impl ScenarioCircuit {
    fn new(circuit: Circuit, labels: OutcomeLabels) -> Self {
        Self { circuit, labels }
    }

    #[inline]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    #[inline]
    pub fn labels(&self) -> &OutcomeLabels {
        &self.labels
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

/// Face of a coin for a measured bit
pub fn coin_face(bit: u8) -> &'static str {
    if bit == 0 {
        "Heads"
    } else {
        "Tails"
    }
}

/// One qubit in equal superposition: `H(0)`
pub fn single_coin_flip() -> Result<ScenarioCircuit> {
    let mut circuit = Circuit::new(1)?;
    circuit.h(Q0)?;

    let labels = OutcomeLabels::from_fn(1, |o| coin_face(o.qubit(0)).to_string());
    Ok(ScenarioCircuit::new(circuit, labels))
}

/// Two independent coins: `H(0), H(1)`
pub fn double_coin_flip() -> Result<ScenarioCircuit> {
    let mut circuit = Circuit::new(2)?;
    circuit.h(Q0)?.h(Q1)?;

    let labels = OutcomeLabels::from_fn(2, |o| {
        match (o.qubit(0), o.qubit(1)) {
            (0, 0) => "Both Heads",
            (0, _) => "H & T",
            (_, 0) => "T & H",
            _ => "Both Tails",
        }
        .to_string()
    });
    Ok(ScenarioCircuit::new(circuit, labels))
}

/// The four maximally entangled two-qubit Bell states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BellState {
    /// (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// (|00⟩ - |11⟩)/√2
    PhiMinus,
    /// (|01⟩ - |10⟩)/√2
    PsiMinus,
}

impl BellState {
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PsiPlus,
        BellState::PhiMinus,
        BellState::PsiMinus,
    ];

    const NAMES: &'static [&'static str] = &["phi_plus", "psi_plus", "phi_minus", "psi_minus"];

    /// Wire identifier, e.g. `"phi_plus"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhiPlus => "phi_plus",
            Self::PsiPlus => "psi_plus",
            Self::PhiMinus => "phi_minus",
            Self::PsiMinus => "psi_minus",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PhiPlus => "|Φ+⟩ = (|00⟩ + |11⟩)/√2: both qubits always agree",
            Self::PsiPlus => "|Ψ+⟩ = (|01⟩ + |10⟩)/√2: both qubits always disagree",
            Self::PhiMinus => "|Φ-⟩ = (|00⟩ - |11⟩)/√2: qubits agree, relative phase",
            Self::PsiMinus => "|Ψ-⟩ = (|01⟩ - |10⟩)/√2: qubits disagree, relative phase",
        }
    }

    /// Whether the qubits are perfectly correlated (Φ) or anti-correlated (Ψ)
    pub fn is_correlated(&self) -> bool {
        matches!(self, Self::PhiPlus | Self::PhiMinus)
    }

    fn flips_second_qubit(&self) -> bool {
        !self.is_correlated()
    }

    fn has_relative_phase(&self) -> bool {
        matches!(self, Self::PhiMinus | Self::PsiMinus)
    }

    /// Theoretical outcome probabilities, without simulation
    ///
    /// Φ states give `00`/`11` with ½ each, Ψ states give `01`/`10`. The
    /// relative phase of the minus states is invisible to measurement.
    pub fn expected_distribution(&self) -> Result<OutcomeDistribution> {
        // basis-index order: |00⟩, "10", "01", |11⟩
        let probabilities = if self.is_correlated() {
            vec![0.5, 0.0, 0.0, 0.5]
        } else {
            vec![0.0, 0.5, 0.5, 0.0]
        };
        Ok(OutcomeDistribution::from_probabilities(
            2,
            probabilities,
            NORMALIZATION_TOLERANCE,
        )?)
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BellState {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| SimulatorError::unknown_parameter("state", s, Self::NAMES))
    }
}

/// Bell pair preparation
///
/// | state | gates |
/// |---|---|
/// | Φ+ | H(0), CNOT(0,1) |
/// | Ψ+ | X(1), H(0), CNOT(0,1) |
/// | Φ- | H(0), CNOT(0,1), Z(0) |
/// | Ψ- | X(1), H(0), CNOT(0,1), Z(0) |
pub fn bell_state(which: BellState) -> Result<ScenarioCircuit> {
    let mut circuit = Circuit::with_capacity(2, 4)?;
    if which.flips_second_qubit() {
        circuit.x(Q1)?;
    }
    circuit.h(Q0)?.cnot(Q0, Q1)?;
    if which.has_relative_phase() {
        circuit.z(Q0)?;
    }
    Ok(ScenarioCircuit::new(circuit, OutcomeLabels::bitstrings(2)))
}

/// Measurement basis for the single-qubit demo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Computational basis
    #[default]
    Z,
    /// Hadamard basis, measured by applying H before a Z measurement
    X,
}

impl Basis {
    const NAMES: &'static [&'static str] = &["z", "x"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Z => "z",
            Self::X => "x",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basis {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "z" | "Z" => Ok(Self::Z),
            "x" | "X" => Ok(Self::X),
            other => Err(SimulatorError::unknown_parameter(
                "basis",
                other,
                Self::NAMES,
            )),
        }
    }
}

/// Single-qubit states for the measurement demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementState {
    /// H|0⟩, 50/50 in Z
    Equal,
    /// 75% |0⟩, 25% |1⟩ in Z
    #[serde(rename = "biased_0")]
    Biased0,
    /// 25% |0⟩, 75% |1⟩ in Z
    #[serde(rename = "biased_1")]
    Biased1,
    /// |0⟩
    #[serde(rename = "definite_0")]
    Definite0,
    /// |1⟩
    #[serde(rename = "definite_1")]
    Definite1,
}

impl MeasurementState {
    pub const ALL: [MeasurementState; 5] = [
        MeasurementState::Equal,
        MeasurementState::Biased0,
        MeasurementState::Biased1,
        MeasurementState::Definite0,
        MeasurementState::Definite1,
    ];

    const NAMES: &'static [&'static str] =
        &["equal", "biased_0", "biased_1", "definite_0", "definite_1"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Biased0 => "biased_0",
            Self::Biased1 => "biased_1",
            Self::Definite0 => "definite_0",
            Self::Definite1 => "definite_1",
        }
    }

    /// Real amplitudes `(a0, a1)` of the prepared state
    fn amplitudes(&self) -> (f64, f64) {
        let half_sqrt3 = 3f64.sqrt() / 2.0;
        match self {
            Self::Equal => (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Self::Biased0 => (half_sqrt3, 0.5),
            Self::Biased1 => (0.5, half_sqrt3),
            Self::Definite0 => (1.0, 0.0),
            Self::Definite1 => (0.0, 1.0),
        }
    }

    /// Theoretical outcome probabilities in `basis`, without simulation
    ///
    /// Measuring in X applies H first, mapping `(a0, a1)` to
    /// `((a0 + a1)/√2, (a0 - a1)/√2)`.
    pub fn expected_distribution(&self, basis: Basis) -> Result<OutcomeDistribution> {
        let (a0, a1) = self.amplitudes();
        let probabilities = match basis {
            Basis::Z => vec![a0 * a0, a1 * a1],
            Basis::X => vec![(a0 + a1).powi(2) / 2.0, (a0 - a1).powi(2) / 2.0],
        };
        Ok(OutcomeDistribution::from_probabilities(
            1,
            probabilities,
            NORMALIZATION_TOLERANCE,
        )?)
    }
}

impl fmt::Display for MeasurementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementState {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| SimulatorError::unknown_parameter("state", s, Self::NAMES))
    }
}

/// Single-qubit measurement demo
///
/// | state | preparation |
/// |---|---|
/// | equal | H(0) |
/// | biased_0 | RY(2·asin(½)) |
/// | biased_1 | RY(2·asin(√3/2)) |
/// | definite_0 | none |
/// | definite_1 | X(0) |
///
/// Measuring in the X basis appends H(0).
pub fn measurement_demo(state: MeasurementState, basis: Basis) -> Result<ScenarioCircuit> {
    let mut circuit = Circuit::with_capacity(1, 2)?;
    match state {
        MeasurementState::Equal => {
            circuit.h(Q0)?;
        }
        MeasurementState::Biased0 => {
            circuit.ry(2.0 * 0.5f64.asin(), Q0)?;
        }
        MeasurementState::Biased1 => {
            circuit.ry(2.0 * (3f64.sqrt() / 2.0).asin(), Q0)?;
        }
        MeasurementState::Definite0 => {}
        MeasurementState::Definite1 => {
            circuit.x(Q0)?;
        }
    }
    if basis == Basis::X {
        circuit.h(Q0)?;
    }
    Ok(ScenarioCircuit::new(circuit, OutcomeLabels::bitstrings(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qflip_core::Gate;

    fn gate_names(scenario: &ScenarioCircuit) -> Vec<&'static str> {
        scenario.circuit().gates().map(Gate::name).collect()
    }

    #[test]
    fn test_coin_circuits() {
        assert_eq!(gate_names(&single_coin_flip().unwrap()), vec!["H"]);

        let double = double_coin_flip().unwrap();
        assert_eq!(double.num_qubits(), 2);
        assert_eq!(
            double.circuit().gates().map(|g| g.target()).collect::<Vec<_>>(),
            vec![Q0, Q1]
        );
    }

    #[test]
    fn test_bell_gate_sequences() {
        let expected = [
            (BellState::PhiPlus, vec!["H", "CNOT"]),
            (BellState::PsiPlus, vec!["X", "H", "CNOT"]),
            (BellState::PhiMinus, vec!["H", "CNOT", "Z"]),
            (BellState::PsiMinus, vec!["X", "H", "CNOT", "Z"]),
        ];
        for (state, names) in expected {
            assert_eq!(gate_names(&bell_state(state).unwrap()), names, "{}", state);
        }
    }

    #[test]
    fn test_measurement_demo_sequences() {
        assert_eq!(
            gate_names(&measurement_demo(MeasurementState::Equal, Basis::X).unwrap()),
            vec!["H", "H"]
        );
        assert!(measurement_demo(MeasurementState::Definite0, Basis::Z)
            .unwrap()
            .circuit()
            .is_empty());
        assert_eq!(
            gate_names(&measurement_demo(MeasurementState::Biased1, Basis::Z).unwrap()),
            vec!["RY"]
        );
    }

    #[test]
    fn test_double_coin_labels_follow_display_order() {
        let labels = double_coin_flip().unwrap().labels().to_map();
        assert_eq!(labels["00"], "Both Heads");
        assert_eq!(labels["01"], "H & T");
        assert_eq!(labels["10"], "T & H");
        assert_eq!(labels["11"], "Both Tails");
    }

    #[test]
    fn test_single_coin_labels() {
        let scenario = single_coin_flip().unwrap();
        let tails = Outcome::new(1, 1).unwrap();
        assert_eq!(scenario.labels().label(&tails), "Tails");
    }

    #[test]
    fn test_parse_identifiers() {
        for state in BellState::ALL {
            assert_eq!(state.as_str().parse::<BellState>().unwrap(), state);
        }
        for state in MeasurementState::ALL {
            assert_eq!(state.to_string().parse::<MeasurementState>().unwrap(), state);
        }
        assert_eq!("x".parse::<Basis>().unwrap(), Basis::X);
    }

    #[test]
    fn test_unknown_identifiers() {
        let err = "phi_plus_typo".parse::<BellState>().unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::UnknownParameter {
                field: "state",
                ref value,
                ..
            } if value == "phi_plus_typo"
        ));

        let err = "y".parse::<Basis>().unwrap_err();
        assert!(matches!(err, SimulatorError::UnknownParameter { field: "basis", .. }));

        assert!("superposed".parse::<MeasurementState>().is_err());
    }

    #[test]
    fn test_serde_identifiers() {
        assert_eq!(serde_json::to_string(&BellState::PsiMinus).unwrap(), "\"psi_minus\"");
        assert_eq!(serde_json::to_string(&MeasurementState::Biased0).unwrap(), "\"biased_0\"");
        assert_eq!(serde_json::to_string(&Basis::X).unwrap(), "\"x\"");
        let state: MeasurementState = serde_json::from_str("\"definite_1\"").unwrap();
        assert_eq!(state, MeasurementState::Definite1);
    }

    #[test]
    fn test_expected_bell_distributions() {
        let phi = BellState::PhiMinus.expected_distribution().unwrap();
        assert_eq!(phi.probability_of("00").unwrap(), 0.5);
        assert_eq!(phi.probability_of("01").unwrap(), 0.0);

        let psi = BellState::PsiPlus.expected_distribution().unwrap();
        assert_eq!(psi.probability_of("01").unwrap(), 0.5);
        assert_eq!(psi.probability_of("10").unwrap(), 0.5);
    }

    #[test]
    fn test_expected_measurement_distributions() {
        let z = MeasurementState::Biased0.expected_distribution(Basis::Z).unwrap();
        assert_relative_eq!(z.probabilities()[0], 0.75, epsilon = 1e-12);

        let x = MeasurementState::Equal.expected_distribution(Basis::X).unwrap();
        assert_relative_eq!(x.probabilities()[0], 1.0, epsilon = 1e-12);

        let x = MeasurementState::Definite1.expected_distribution(Basis::X).unwrap();
        assert_relative_eq!(x.probabilities()[1], 0.5, epsilon = 1e-12);
    }
}
