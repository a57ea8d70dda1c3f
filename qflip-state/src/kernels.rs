//! Closed-form gate kernels
//!
//! Each kernel rewrites amplitudes in place without building a gate matrix.
//! Single-qubit kernels walk every pair of basis indices `(i, j)` that differ
//! only in the target bit, with `i` holding the target bit at 0.
//!
//! Kernels assume the caller has already checked qubit indices against the
//! slice length; see [`StateVector::apply_gate`](crate::StateVector::apply_gate).

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// Visit every `(low, high)` index pair differing only in `qubit`
#[inline]
fn for_each_pair(
    state: &mut [Complex64],
    qubit: usize,
    mut f: impl FnMut(&mut [Complex64], usize, usize),
) {
    let dimension = state.len();
    let qubit_mask = 1usize << qubit;

    for i in 0..dimension {
        // Skip the "high" half, pairs are processed from their low index
        if i & qubit_mask != 0 {
            continue;
        }
        let j = i | qubit_mask;
        f(state, i, j);
    }
}

/// Hadamard: `(a, b) -> ((a + b)/√2, (a - b)/√2)`
pub fn apply_hadamard(state: &mut [Complex64], qubit: usize) {
    for_each_pair(state, qubit, |state, i, j| {
        let a = state[i];
        let b = state[j];
        state[i] = (a + b) * FRAC_1_SQRT_2;
        state[j] = (a - b) * FRAC_1_SQRT_2;
    });
}

/// Pauli-X: swap each pair
pub fn apply_pauli_x(state: &mut [Complex64], qubit: usize) {
    for_each_pair(state, qubit, |state, i, j| state.swap(i, j));
}

/// Pauli-Z: negate every amplitude whose target bit is 1
pub fn apply_pauli_z(state: &mut [Complex64], qubit: usize) {
    let qubit_mask = 1usize << qubit;
    state
        .iter_mut()
        .enumerate()
        .filter(|(i, _)| i & qubit_mask != 0)
        .for_each(|(_, amp)| *amp = -*amp);
}

/// RY(θ): `a' = cos(θ/2)a - sin(θ/2)b`, `b' = sin(θ/2)a + cos(θ/2)b`
pub fn apply_rotation_y(state: &mut [Complex64], theta: f64, qubit: usize) {
    let (sin, cos) = (theta / 2.0).sin_cos();
    for_each_pair(state, qubit, |state, i, j| {
        let a = state[i];
        let b = state[j];
        state[i] = a * cos - b * sin;
        state[j] = a * sin + b * cos;
    });
}

/// CNOT: swap pairs differing in `target`, only where `control` is 1
pub fn apply_cnot(state: &mut [Complex64], control: usize, target: usize) {
    let control_mask = 1usize << control;
    for_each_pair(state, target, |state, i, j| {
        // i and j share the control bit since control != target
        if i & control_mask != 0 {
            state.swap(i, j);
        }
    });
}
