//! Dynamic dispatcher
//!
//! Resolves `(operation, kernel)` to a registered routine and invokes it on a
//! caller-owned state vector. The dispatcher does no numeric work and never
//! allocates, resizes or keeps the state vector.
//!
//! All argument checks the dispatcher owns (name resolution, routine lookup,
//! batch lengths, matrix size) happen before the first routine runs, so a
//! returned error other than [`DispatchError::Routine`] means the state is
//! untouched.

use num_complex::Complex;
use tracing::trace_span;

use crate::catalog::{GateOperation, GeneratorOperation, KernelType, MatrixOperation, ToOperation};
use crate::error::{DispatchError, Result};
use crate::global::global_registry;
use crate::precision::Precision;
use crate::registry::KernelRegistry;

/// Call surface over a [`KernelRegistry`].
///
/// Cheap to copy; holds only a shared borrow of the registry.
#[derive(Debug)]
pub struct Dispatcher<'r, T: Precision> {
    registry: &'r KernelRegistry<T>,
}

impl<T: Precision> Clone for Dispatcher<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Precision> Copy for Dispatcher<'_, T> {}

impl<T: Precision> Dispatcher<'static, T> {
    /// Dispatcher over the process-wide registry for `T`.
    pub fn global() -> Result<Self> {
        global_registry::<T>().map(Self::new)
    }
}

impl<'r, T: Precision> Dispatcher<'r, T> {
    pub fn new(registry: &'r KernelRegistry<T>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r KernelRegistry<T> {
        self.registry
    }

    /// Apply one gate, named by id or catalog name.
    ///
    /// Wire and parameter counts are checked by the routine, not here.
    pub fn apply_operation<O>(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        op: O,
        wires: &[usize],
        inverse: bool,
        params: &[T],
    ) -> Result<()>
    where
        O: ToOperation<GateOperation>,
    {
        let gate_op = op.to_operation()?;
        let routine = self.registry.gate_routine(gate_op, kernel)?;
        let _span = trace_span!("apply_operation", op = %gate_op, %kernel, num_qubits, inverse).entered();
        routine.apply(state, num_qubits, wires, inverse, params)?;
        Ok(())
    }

    /// Apply parameter-free gates in order, `ops[0]` first.
    ///
    /// `ops`, `wires` and `inverse` must have equal lengths.
    pub fn apply_operations<O, W>(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        ops: &[O],
        wires: &[W],
        inverse: &[bool],
    ) -> Result<()>
    where
        O: ToOperation<GateOperation>,
        W: AsRef<[usize]>,
    {
        self.apply_batch::<O, W, &[T]>(kernel, state, num_qubits, ops, wires, inverse, None)
    }

    /// Apply gates with per-gate parameters in order, `ops[0]` first.
    ///
    /// `ops`, `wires`, `inverse` and `params` must have equal lengths.
    pub fn apply_operations_with_params<O, W, P>(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        ops: &[O],
        wires: &[W],
        inverse: &[bool],
        params: &[P],
    ) -> Result<()>
    where
        O: ToOperation<GateOperation>,
        W: AsRef<[usize]>,
        P: AsRef<[T]>,
    {
        self.apply_batch(kernel, state, num_qubits, ops, wires, inverse, Some(params))
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_batch<O, W, P>(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        ops: &[O],
        wires: &[W],
        inverse: &[bool],
        params: Option<&[P]>,
    ) -> Result<()>
    where
        O: ToOperation<GateOperation>,
        W: AsRef<[usize]>,
        P: AsRef<[T]>,
    {
        let num_ops = ops.len();
        let params_len = params.map(<[P]>::len);
        if wires.len() != num_ops || inverse.len() != num_ops || params_len.is_some_and(|len| len != num_ops) {
            return Err(DispatchError::ArgumentCountMismatch {
                operations: num_ops,
                wires: wires.len(),
                inverses: inverse.len(),
                params: params_len,
            });
        }

        // Resolve the whole batch before touching the state.
        let routines = ops
            .iter()
            .map(|op| {
                let gate_op = op.to_operation()?;
                Ok((gate_op, self.registry.gate_routine(gate_op, kernel)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let _span = trace_span!("apply_operations", %kernel, num_qubits, num_ops).entered();
        for (index, (gate_op, routine)) in routines.into_iter().enumerate() {
            let gate_params = params.map_or(&[][..], |params| params[index].as_ref());
            let _op_span = trace_span!("gate", index, op = %gate_op).entered();
            routine.apply(state, num_qubits, wires[index].as_ref(), inverse[index], gate_params)?;
        }
        Ok(())
    }

    /// Apply a row-major `2^k x 2^k` matrix to `k = wires.len()` wires.
    ///
    /// The routine is chosen by wire count: one wire uses
    /// [`MatrixOperation::SingleQubitOp`], two use `TwoQubitOp`, anything else
    /// `MultiQubitOp`.
    pub fn apply_matrix(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        matrix: &[Complex<T>],
        wires: &[usize],
        inverse: bool,
    ) -> Result<()> {
        let num_wires = wires.len();
        let expected = matrix_len(num_wires);
        if num_wires > num_qubits || matrix.len() != expected {
            return Err(DispatchError::IncompatibleMatrixSize {
                num_wires,
                num_qubits,
                expected,
                actual: matrix.len(),
            });
        }

        let mat_op = MatrixOperation::from_num_wires(num_wires);
        let routine = self.registry.matrix_routine(mat_op, kernel)?;
        let _span = trace_span!("apply_matrix", op = %mat_op, %kernel, num_qubits, num_wires, inverse).entered();
        routine.apply(state, num_qubits, matrix, wires, inverse)?;
        Ok(())
    }

    /// Apply a generator and return its scale factor.
    ///
    /// Both the mutated state and the returned coefficient are results.
    pub fn apply_generator<O>(
        &self,
        kernel: KernelType,
        state: &mut [Complex<T>],
        num_qubits: usize,
        op: O,
        wires: &[usize],
        adjoint: bool,
    ) -> Result<T>
    where
        O: ToOperation<GeneratorOperation>,
    {
        let gntr_op = op.to_operation()?;
        let routine = self.registry.generator_routine(gntr_op, kernel)?;
        let _span = trace_span!("apply_generator", op = %gntr_op, %kernel, num_qubits, adjoint).entered();
        Ok(routine.apply(state, num_qubits, wires, adjoint)?)
    }
}

/// `4^num_wires`, saturating at `usize::MAX`.
fn matrix_len(num_wires: usize) -> usize {
    u32::try_from(2 * num_wires)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .unwrap_or(usize::MAX)
}
