//! Measurement outcomes as bitstrings

use crate::error::{Result, StateError};
use qflip_core::MAX_QUBITS;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One measurement result over an n-qubit register
///
/// Internally an outcome is a basis-state index where qubit 0 is the
/// least-significant bit. Its text form lists qubits in presentation order,
/// qubit 0 first, so index `0b01` on two qubits displays as `"10"`.
///
/// # Example
/// ```
/// use qflip_state::Outcome;
///
/// let outcome = Outcome::new(0b01, 2).unwrap();
/// assert_eq!(outcome.to_string(), "10");
/// assert_eq!(outcome.qubit(0), 1);
/// assert_eq!(outcome.qubit(1), 0);
///
/// let parsed: Outcome = "10".parse().unwrap();
/// assert_eq!(parsed, outcome);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome {
    index: usize,
    num_qubits: usize,
}

impl Outcome {
    /// Create an outcome from a basis-state index
    ///
    /// # Errors
    /// Returns error if the register size is unsupported or the index does
    /// not fit in `num_qubits` bits
    pub fn new(index: usize, num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(StateError::UnsupportedQubitCount { num_qubits });
        }
        if index >= 1 << num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: 1 << num_qubits,
                actual: index + 1,
            });
        }
        Ok(Self { index, num_qubits })
    }

    /// Every outcome of an n-qubit register, in basis-index order
    pub fn all(num_qubits: usize) -> impl Iterator<Item = Outcome> {
        (0..1usize << num_qubits).map(move |index| Outcome { index, num_qubits })
    }

    /// Basis-state index (qubit 0 = least-significant bit)
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Measured value of a single qubit
    #[inline]
    pub fn qubit(&self, qubit: usize) -> u8 {
        ((self.index >> qubit) & 1) as u8
    }

    /// Qubit values in presentation order (qubit 0 first)
    pub fn bits(&self) -> Vec<u8> {
        (0..self.num_qubits).map(|q| self.qubit(q)).collect()
    }

    /// Parse a presentation-order bitstring such as `"01"`
    pub fn from_bitstring(bits: &str) -> Result<Self> {
        let invalid = || StateError::InvalidOutcome(bits.to_string());
        if bits.is_empty() || bits.len() > MAX_QUBITS {
            return Err(invalid());
        }

        let index = bits.chars().enumerate().try_fold(0usize, |acc, (qubit, c)| {
            match c {
                '0' => Ok(acc),
                '1' => Ok(acc | 1 << qubit),
                _ => Err(invalid()),
            }
        })?;

        Self::new(index, bits.len()).map_err(|_| invalid())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.num_qubits {
            write!(f, "{}", self.qubit(q))?;
        }
        Ok(())
    }
}

impl FromStr for Outcome {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bitstring(s)
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
