//! Argument checks shared by all kernels

use num_complex::Complex;
use qsim_dispatch::{GateOperation, GeneratorOperation, Precision, RoutineError, RoutineResult};

/// The state must hold exactly `2^num_qubits` amplitudes.
pub fn check_state<T: Precision>(state: &[Complex<T>], num_qubits: usize) -> RoutineResult<()> {
    let expected = u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .unwrap_or(usize::MAX);
    if state.len() != expected {
        return Err(RoutineError::StateLength {
            num_qubits,
            expected,
            actual: state.len(),
        });
    }
    Ok(())
}

/// Wires must be in range and distinct.
///
/// Call after [`check_state`], which bounds `num_qubits` below 64.
pub fn check_wires(wires: &[usize], num_qubits: usize) -> RoutineResult<()> {
    let mut seen = 0u64;
    for &wire in wires {
        if wire >= num_qubits {
            return Err(RoutineError::WireOutOfRange { wire, num_qubits });
        }
        let bit = 1u64 << wire;
        if seen & bit != 0 {
            return Err(RoutineError::DuplicateWire { wire });
        }
        seen |= bit;
    }
    Ok(())
}

fn check_arity(operation: &'static str, fixed_wires: Option<usize>, wires: &[usize]) -> RoutineResult<()> {
    match fixed_wires {
        Some(expected) if wires.len() != expected => Err(RoutineError::WireCount {
            operation,
            expected,
            actual: wires.len(),
        }),
        None if wires.is_empty() => Err(RoutineError::EmptyWires { operation }),
        _ => Ok(()),
    }
}

/// Full check for a named gate call.
pub fn check_gate<T: Precision>(
    op: GateOperation,
    state: &[Complex<T>],
    num_qubits: usize,
    wires: &[usize],
    params: &[T],
) -> RoutineResult<()> {
    check_state(state, num_qubits)?;
    check_arity(op.name(), op.num_wires(), wires)?;
    if params.len() != op.num_params() {
        return Err(RoutineError::ParamCount {
            operation: op.name(),
            expected: op.num_params(),
            actual: params.len(),
        });
    }
    check_wires(wires, num_qubits)
}

/// Full check for a generator call. Arity follows the generator's gate.
pub fn check_generator<T: Precision>(
    op: GeneratorOperation,
    state: &[Complex<T>],
    num_qubits: usize,
    wires: &[usize],
) -> RoutineResult<()> {
    check_state(state, num_qubits)?;
    check_arity(op.full_name(), op.gate().num_wires(), wires)?;
    check_wires(wires, num_qubits)
}

/// Check for a matrix call; the dispatcher has already matched the matrix size.
pub fn check_matrix<T: Precision>(state: &[Complex<T>], num_qubits: usize, wires: &[usize]) -> RoutineResult<()> {
    check_state(state, num_qubits)?;
    check_wires(wires, num_qubits)
}
