//! Dense application of a local matrix to arbitrary wires
//!
//! Wire `w` of an `n`-qubit state lives at bit position `n - 1 - w` of the
//! amplitude index, so wire 0 is the most significant bit.

use num_complex::Complex;
use qsim_dispatch::Precision;

/// Bit mask selecting `wire` in an amplitude index.
#[inline]
pub fn wire_bit(num_qubits: usize, wire: usize) -> usize {
    1usize << (num_qubits - 1 - wire)
}

/// Index offsets of the `2^k` local basis states relative to a base index
/// whose target bits are all clear.
pub fn local_offsets(num_qubits: usize, wires: &[usize]) -> Vec<usize> {
    let k = wires.len();
    (0..1usize << k)
        .map(|local| {
            wires
                .iter()
                .enumerate()
                .filter(|(t, _)| local & (1 << (k - 1 - t)) != 0)
                .map(|(_, &w)| wire_bit(num_qubits, w))
                .sum()
        })
        .collect()
}

/// Multiply `matrix` (or its conjugate transpose) into the amplitudes on
/// `wires`. Arguments are assumed valid.
pub fn apply_dense<T: Precision>(
    state: &mut [Complex<T>],
    num_qubits: usize,
    matrix: &[Complex<T>],
    wires: &[usize],
    inverse: bool,
) {
    let offsets = local_offsets(num_qubits, wires);
    let dim = offsets.len();
    let mask: usize = wires.iter().map(|&w| wire_bit(num_qubits, w)).sum();
    let zero = Complex::new(T::zero(), T::zero());
    let mut gathered = vec![zero; dim];

    for base in (0..state.len()).filter(|i| i & mask == 0) {
        for (slot, &off) in gathered.iter_mut().zip(&offsets) {
            *slot = state[base + off];
        }
        for (row, &off) in offsets.iter().enumerate() {
            state[base + off] = (0..dim).fold(zero, |acc, col| {
                let entry = if inverse {
                    matrix[col * dim + row].conj()
                } else {
                    matrix[row * dim + col]
                };
                acc + entry * gathered[col]
            });
        }
    }
}
