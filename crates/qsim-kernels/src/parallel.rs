//! Strided kernel for one- and two-wire operations
//!
//! The state is split into independent blocks along the highest target bit
//! and updated with rayon once the register reaches
//! [`KernelConfig::parallel_min_qubits`](crate::KernelConfig). Smaller
//! states take the same strided path on one thread.
//!
//! Three-qubit gates, `MultiRZ`, generators and `MultiQubitOp` are not
//! registered for this kernel.

use num_complex::Complex;
use qsim_dispatch::{
    gate_fn, matrix_fn, GateOperation, KernelBackend, KernelType, MatrixOperation, Precision, RegistryBuilder,
    RoutineError, RoutineResult,
};
use qsim_tracing::perf_span;
use rayon::prelude::*;

use crate::apply::wire_bit;
use crate::config::DEFAULT_PARALLEL_MIN_QUBITS;
use crate::matrices::{adjoint, gate_matrix};
use crate::validate::{check_gate, check_matrix};

#[derive(Debug, Clone, Copy)]
pub struct ParallelKernel {
    min_qubits: usize,
}

impl Default for ParallelKernel {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_MIN_QUBITS)
    }
}

impl ParallelKernel {
    /// Registers at or above `min_qubits` are updated on the rayon pool.
    pub fn new(min_qubits: usize) -> Self {
        Self { min_qubits }
    }

    pub fn min_qubits(&self) -> usize {
        self.min_qubits
    }

    /// Gates with a fixed arity of one or two wires.
    pub fn supports(op: GateOperation) -> bool {
        matches!(op.num_wires(), Some(1 | 2))
    }
}

impl<T: Precision> KernelBackend<T> for ParallelKernel {
    fn kernel(&self) -> KernelType {
        KernelType::Parallel
    }

    fn register_routines(&self, builder: &mut RegistryBuilder<T>) {
        let min_qubits = self.min_qubits;

        for op in GateOperation::ALL.into_iter().filter(|&op| Self::supports(op)) {
            builder.register_gate(
                op,
                KernelType::Parallel,
                gate_fn::<T, _>(move |state, num_qubits, wires, inverse, params| {
                    check_gate(op, state, num_qubits, wires, params)?;
                    let mut matrix = gate_matrix(op, wires.len(), params);
                    if inverse {
                        matrix = adjoint(&matrix);
                    }
                    apply_strided(state, num_qubits, &matrix, wires, num_qubits >= min_qubits)
                }),
            );
        }

        for op in [MatrixOperation::SingleQubitOp, MatrixOperation::TwoQubitOp] {
            builder.register_matrix(
                op,
                KernelType::Parallel,
                matrix_fn::<T, _>(move |state, num_qubits, matrix, wires, inverse| {
                    check_matrix(state, num_qubits, wires)?;
                    if inverse {
                        let matrix = adjoint(matrix);
                        apply_strided(state, num_qubits, &matrix, wires, num_qubits >= min_qubits)
                    } else {
                        apply_strided(state, num_qubits, matrix, wires, num_qubits >= min_qubits)
                    }
                }),
            );
        }
    }
}

fn apply_strided<T: Precision>(
    state: &mut [Complex<T>],
    num_qubits: usize,
    matrix: &[Complex<T>],
    wires: &[usize],
    parallel: bool,
) -> RoutineResult<()> {
    match (wires, matrix) {
        (&[wire], &[m00, m01, m10, m11]) => {
            let _span = perf_span!("parallel_one_wire", num_qubits = num_qubits, parallel = parallel);
            apply_one_wire(state, wire_bit(num_qubits, wire), [m00, m01, m10, m11], parallel);
            Ok(())
        }
        (&[first, second], _) if matrix.len() == 16 => {
            let _span = perf_span!("parallel_two_wire", num_qubits = num_qubits, parallel = parallel);
            let mut m = [Complex::new(T::zero(), T::zero()); 16];
            m.copy_from_slice(matrix);
            apply_two_wire(
                state,
                wire_bit(num_qubits, first),
                wire_bit(num_qubits, second),
                m,
                parallel,
            );
            Ok(())
        }
        _ => Err(RoutineError::WireCount {
            operation: "Parallel",
            expected: 2,
            actual: wires.len(),
        }),
    }
}

fn apply_one_wire<T: Precision>(state: &mut [Complex<T>], bit: usize, m: [Complex<T>; 4], parallel: bool) {
    let update = |block: &mut [Complex<T>]| {
        let (lo, hi) = block.split_at_mut(bit);
        for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
            let (x, y) = (*a, *b);
            *a = m[0] * x + m[1] * y;
            *b = m[2] * x + m[3] * y;
        }
    };
    if parallel {
        state.par_chunks_mut(2 * bit).for_each(update);
    } else {
        state.chunks_mut(2 * bit).for_each(update);
    }
}

/// `first` and `second` are the bit masks of the operation's first and second
/// wire. Blocks are cut along the higher of the two bits.
fn apply_two_wire<T: Precision>(
    state: &mut [Complex<T>],
    first: usize,
    second: usize,
    m: [Complex<T>; 16],
    parallel: bool,
) {
    let (high, low) = (first.max(second), first.min(second));
    // Block order is (high, low); matrix order is (first, second).
    let perm: [usize; 4] = if first > second { [0, 1, 2, 3] } else { [0, 2, 1, 3] };

    let update = |block: &mut [Complex<T>]| {
        let (h0, h1) = block.split_at_mut(high);
        for (c0, c1) in h0.chunks_mut(2 * low).zip(h1.chunks_mut(2 * low)) {
            let (a00, a01) = c0.split_at_mut(low);
            let (a10, a11) = c1.split_at_mut(low);
            for j in 0..low {
                let block_amps = [a00[j], a01[j], a10[j], a11[j]];
                let mut x = block_amps;
                for (q, &amp) in block_amps.iter().enumerate() {
                    x[perm[q]] = amp;
                }
                let y: [Complex<T>; 4] = std::array::from_fn(|r| {
                    m[r * 4] * x[0] + m[r * 4 + 1] * x[1] + m[r * 4 + 2] * x[2] + m[r * 4 + 3] * x[3]
                });
                a00[j] = y[perm[0]];
                a01[j] = y[perm[1]];
                a10[j] = y[perm[2]];
                a11[j] = y[perm[3]];
            }
        }
    };
    if parallel {
        state.par_chunks_mut(2 * high).for_each(update);
    } else {
        state.chunks_mut(2 * high).for_each(update);
    }
}
