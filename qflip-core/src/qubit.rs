//! Qubit addressing and identification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit
///
/// Qubit `k` corresponds to bit `k` of a basis-state index, so qubit 0 is
/// the least-significant bit.
///
/// # Example
/// ```
/// use qflip_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// assert_eq!(q1.mask(), 0b10);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Bit mask selecting this qubit within a basis-state index
    #[inline]
    pub const fn mask(&self) -> usize {
        1 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        assert!(QubitId::new(0) < QubitId::new(1));
        assert_eq!(QubitId::new(1), QubitId::from(1));
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId::new(1)), "q1");
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(QubitId::new(0).mask(), 1);
        assert_eq!(QubitId::new(1).mask(), 2);
    }

    #[test]
    fn test_usize_from_qubit() {
        let i: usize = QubitId::new(1).into();
        assert_eq!(i, 1);
    }
}
