//! Scalar reference kernel
//!
//! Every gate, generator and matrix class goes through [`apply_dense`]. It is
//! the slowest kernel and the one the others are tested against.

use qsim_dispatch::{
    gate_fn, generator_fn, matrix_fn, GateOperation, GeneratorOperation, KernelBackend, KernelType, MatrixOperation,
    Precision, RegistryBuilder,
};
use qsim_tracing::{perf_span, timed_block};

use crate::apply::apply_dense;
use crate::matrices::{gate_matrix, generator_matrix};
use crate::validate::{check_gate, check_generator, check_matrix};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl ReferenceKernel {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Precision> KernelBackend<T> for ReferenceKernel {
    fn kernel(&self) -> KernelType {
        KernelType::Reference
    }

    fn register_routines(&self, builder: &mut RegistryBuilder<T>) {
        for op in GateOperation::ALL {
            builder.register_gate(
                op,
                KernelType::Reference,
                gate_fn::<T, _>(move |state, num_qubits, wires, inverse, params| {
                    check_gate(op, state, num_qubits, wires, params)?;
                    let _span = perf_span!("reference_gate", gate = op.name(), num_qubits = num_qubits);
                    let matrix = gate_matrix(op, wires.len(), params);
                    apply_dense(state, num_qubits, &matrix, wires, inverse);
                    Ok(())
                }),
            );
        }

        for op in GeneratorOperation::ALL {
            builder.register_generator(
                op,
                KernelType::Reference,
                generator_fn::<T, _>(move |state, num_qubits, wires, adjoint| {
                    check_generator(op, state, num_qubits, wires)?;
                    let (matrix, scale) = generator_matrix::<T>(op, wires.len());
                    // Generators are Hermitian, so the adjoint is the same operator.
                    apply_dense(state, num_qubits, &matrix, wires, adjoint);
                    Ok(scale)
                }),
            );
        }

        for op in MatrixOperation::ALL {
            builder.register_matrix(
                op,
                KernelType::Reference,
                matrix_fn::<T, _>(move |state, num_qubits, matrix, wires, inverse| {
                    check_matrix(state, num_qubits, wires)?;
                    let ((), _duration_us) = timed_block!(op.name(), {
                        apply_dense(state, num_qubits, matrix, wires, inverse)
                    });
                    Ok(())
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qsim_dispatch::{build_registry, Dispatcher, DispatchError, RoutineError};

    fn registry() -> qsim_dispatch::KernelRegistry<f64> {
        let backends: Vec<Box<dyn KernelBackend<f64>>> = vec![Box::new(ReferenceKernel)];
        build_registry(&backends)
    }

    fn basis(num_qubits: usize, index: usize) -> Vec<Complex64> {
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        state[index] = Complex64::new(1.0, 0.0);
        state
    }

    #[test]
    fn registers_the_whole_catalog() {
        let registry = registry();
        let kernel = KernelType::Reference;
        assert_eq!(registry.registered_gates_for_kernel(kernel).len(), GateOperation::ALL.len());
        assert_eq!(registry.registered_generators_for_kernel(kernel).len(), GeneratorOperation::ALL.len());
        assert_eq!(registry.registered_matrices_for_kernel(kernel).len(), MatrixOperation::ALL.len());
        assert_eq!(registry.kernel_name(kernel).unwrap(), "Reference");
    }

    #[test]
    fn toffoli_on_reordered_wires() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        // controls on wires 2 and 0, target wire 1: |101⟩ -> |111⟩
        let mut state = basis(3, 0b101);
        dispatcher
            .apply_operation(KernelType::Reference, &mut state, 3, GateOperation::Toffoli, &[2, 0, 1], false, &[])
            .unwrap();
        assert_eq!(state, basis(3, 0b111));
    }

    #[test]
    fn multi_rz_phases_by_parity() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let theta = 0.6;
        let mut state = basis(3, 0b011);
        dispatcher
            .apply_operation(KernelType::Reference, &mut state, 3, "MultiRZ", &[0, 1, 2], false, &[theta])
            .unwrap();
        let expected = Complex64::from_polar(1.0, -theta / 2.0);
        assert!((state[0b011] - expected).norm() < 1e-12);
    }

    #[test]
    fn routine_errors_surface_through_dispatch() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let mut state = basis(2, 0);
        let err = dispatcher
            .apply_operation(KernelType::Reference, &mut state, 2, "CNOT", &[1, 1], false, &[])
            .unwrap_err();
        assert_eq!(err, DispatchError::Routine(RoutineError::DuplicateWire { wire: 1 }));
        assert_eq!(state, basis(2, 0));
    }

    #[test]
    fn generator_returns_scale() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let mut state = basis(1, 0);
        let scale = dispatcher
            .apply_generator(KernelType::Reference, &mut state, 1, "RX", &[0], false)
            .unwrap();
        assert_eq!(scale, -0.5);
        assert_eq!(state, basis(1, 1));

        let mut state = basis(1, 1);
        let scale = dispatcher
            .apply_generator(KernelType::Reference, &mut state, 1, GeneratorOperation::PhaseShift, &[0], false)
            .unwrap();
        assert_eq!(scale, 1.0);
        assert_eq!(state, basis(1, 1));
    }

    #[test]
    fn matrix_routine_applies_and_inverts() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let s_gate = [one, zero, zero, Complex64::new(0.0, 1.0)];

        let mut state = basis(2, 0b01);
        dispatcher
            .apply_matrix(KernelType::Reference, &mut state, 2, &s_gate, &[1], false)
            .unwrap();
        assert_eq!(state[0b01], Complex64::new(0.0, 1.0));

        dispatcher
            .apply_matrix(KernelType::Reference, &mut state, 2, &s_gate, &[1], true)
            .unwrap();
        assert_eq!(state, basis(2, 0b01));
    }

    /// dU/dθ ψ = i s G U ψ, checked by central differences.
    #[test]
    fn generators_match_finite_differences() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let theta = 0.41;
        let h = 1e-6;
        let num_qubits = 3;
        let initial: Vec<Complex64> = (0..8)
            .map(|i| Complex64::new(0.1 * i as f64 + 0.2, 0.05 * (7 - i) as f64))
            .collect();

        for op in GeneratorOperation::ALL {
            let wires: Vec<usize> = match op.gate().num_wires() {
                Some(1) => vec![1],
                Some(2) => vec![2, 0],
                _ => vec![0, 1, 2],
            };
            let run = |angle: f64| {
                let mut state = initial.clone();
                dispatcher
                    .apply_operation(KernelType::Reference, &mut state, num_qubits, op.gate(), &wires, false, &[angle])
                    .unwrap();
                state
            };
            let (plus, minus) = (run(theta + h), run(theta - h));
            let mut analytic = run(theta);
            let scale = dispatcher
                .apply_generator(KernelType::Reference, &mut analytic, num_qubits, op, &wires, false)
                .unwrap();
            for i in 0..analytic.len() {
                let numeric = (plus[i] - minus[i]) / (2.0 * h);
                let expected = Complex64::new(0.0, scale) * analytic[i];
                assert!((numeric - expected).norm() < 1e-6, "{op} amplitude {i}: {numeric} vs {expected}");
            }
        }
    }
}
