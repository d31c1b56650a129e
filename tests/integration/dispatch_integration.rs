//! End-to-end dispatch through the process-wide registry

use num_complex::{Complex32, Complex64};
use proptest::prelude::*;
use qsim::{
    available_backends, build_registry, DispatchError, Dispatcher, GateOperation, GeneratorOperation, KernelConfig,
    KernelRegistry, KernelType, OperationFamily, OperationId, ParallelKernel,
};

const TOL: f64 = 1e-7;

/// Thread the parallel kernel at every size so the rayon path is exercised.
fn registry() -> &'static KernelRegistry<f64> {
    qsim::init_test_tracing();
    qsim::initialize_with(&KernelConfig::default().with_parallel_min_qubits(0))
}

fn dispatcher() -> Dispatcher<'static, f64> {
    Dispatcher::new(registry())
}

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn basis(num_qubits: usize, index: usize) -> Vec<Complex64> {
    let mut state = vec![c(0.0); 1 << num_qubits];
    state[index] = c(1.0);
    state
}

fn assert_close(actual: &[Complex64], expected: &[Complex64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).norm() < TOL, "amplitude {i}: {a} != {e}");
    }
}

fn normalized(seed: &[(f64, f64)]) -> Vec<Complex64> {
    let norm = seed.iter().map(|(re, im)| re * re + im * im).sum::<f64>().sqrt().max(1e-9);
    seed.iter().map(|&(re, im)| Complex64::new(re / norm, im / norm)).collect()
}

#[test]
fn hadamard_on_zero_state() {
    for kernel in KernelType::ALL {
        let mut state = basis(1, 0);
        dispatcher()
            .apply_operation(kernel, &mut state, 1, "Hadamard", &[0], false, &[])
            .unwrap();
        assert_close(&state, &[c(0.70710678), c(0.70710678)]);
    }
}

#[test]
fn cnot_pauli_x_cnot_step_by_step() {
    for kernel in KernelType::ALL {
        let d = dispatcher();
        let mut state = basis(2, 0);

        d.apply_operation(kernel, &mut state, 2, "CNOT", &[0, 1], false, &[]).unwrap();
        assert_close(&state, &basis(2, 0b00));

        d.apply_operation(kernel, &mut state, 2, "PauliX", &[0], false, &[]).unwrap();
        assert_close(&state, &basis(2, 0b10));

        d.apply_operation(kernel, &mut state, 2, "CNOT", &[0, 1], false, &[]).unwrap();
        assert_close(&state, &basis(2, 0b11));
    }
}

#[test]
fn batch_matches_step_by_step() {
    let mut state = basis(2, 0);
    dispatcher()
        .apply_operations(
            KernelType::Parallel,
            &mut state,
            2,
            &["CNOT", "PauliX", "CNOT"],
            &[vec![0usize, 1], vec![0], vec![0, 1]],
            &[false, false, false],
        )
        .unwrap();
    assert_close(&state, &basis(2, 0b11));
}

#[test]
fn batch_applies_in_sequence_order() {
    let d = dispatcher();
    let mut xz = basis(1, 0);
    d.apply_operations(
        KernelType::Reference,
        &mut xz,
        1,
        &[GateOperation::PauliX, GateOperation::PauliZ],
        &[[0usize], [0]],
        &[false, false],
    )
    .unwrap();
    let mut zx = basis(1, 0);
    d.apply_operations(
        KernelType::Reference,
        &mut zx,
        1,
        &[GateOperation::PauliZ, GateOperation::PauliX],
        &[[0usize], [0]],
        &[false, false],
    )
    .unwrap();

    assert_close(&xz, &[c(0.0), c(-1.0)]);
    assert_close(&zx, &[c(0.0), c(1.0)]);
}

#[test]
fn batch_with_params() {
    let mut state = basis(1, 0);
    dispatcher()
        .apply_operations_with_params(
            KernelType::Reference,
            &mut state,
            1,
            &["RX", "RX"],
            &[[0usize], [0]],
            &[false, false],
            &[vec![0.4], vec![std::f64::consts::PI - 0.4]],
        )
        .unwrap();
    // RX(π)|0⟩ = -i|1⟩
    assert_close(&state, &[c(0.0), Complex64::new(0.0, -1.0)]);
}

#[test]
fn batch_length_mismatch_is_rejected() {
    let mut state = basis(1, 0);
    let err = dispatcher()
        .apply_operations(KernelType::Reference, &mut state, 1, &["PauliX", "PauliX"], &[[0usize]], &[false, false])
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::ArgumentCountMismatch {
            operations: 2,
            wires: 1,
            inverses: 2,
            params: None
        }
    ));
    assert_eq!(state, basis(1, 0));
}

#[test]
fn failed_batch_resolution_leaves_state_untouched() {
    let mut state = basis(3, 0);
    let err = dispatcher()
        .apply_operations(
            KernelType::Parallel,
            &mut state,
            3,
            &["PauliX", "Toffoli"],
            &[vec![0usize], vec![0, 1, 2]],
            &[false, false],
        )
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnregisteredKernel { .. }));
    assert_eq!(state, basis(3, 0));
}

#[test]
fn unknown_names_are_rejected_before_mutation() {
    let d = dispatcher();
    let mut state = basis(1, 0);
    assert_eq!(
        d.apply_operation(KernelType::Reference, &mut state, 1, "Hadamardd", &[0], false, &[]),
        Err(DispatchError::UnknownOperationName {
            family: OperationFamily::Gate,
            name: "Hadamardd".to_string()
        })
    );
    assert!(matches!(
        d.apply_generator(KernelType::Reference, &mut state, 1, "Hadamard", &[0], false),
        Err(DispatchError::UnknownOperationName {
            family: OperationFamily::Generator,
            ..
        })
    ));
    assert_eq!(state, basis(1, 0));
}

#[test]
fn unregistered_pairs_leave_buffer_unchanged() {
    let d = dispatcher();
    let original = normalized(&[(0.1, 0.2), (0.3, -0.1), (0.5, 0.0), (-0.2, 0.4), (0.1, 0.1), (0.0, -0.3), (0.2, 0.2), (0.6, 0.0)]);

    let mut state = original.clone();
    assert_eq!(
        d.apply_operation(KernelType::Parallel, &mut state, 3, GateOperation::Toffoli, &[0, 1, 2], false, &[]),
        Err(DispatchError::UnregisteredKernel {
            operation: OperationId::Gate(GateOperation::Toffoli),
            kernel: KernelType::Parallel
        })
    );
    assert_eq!(state, original);

    assert_eq!(
        d.apply_generator(KernelType::Parallel, &mut state, 3, GeneratorOperation::RY, &[1], false),
        Err(DispatchError::UnregisteredKernel {
            operation: OperationId::Generator(GeneratorOperation::RY),
            kernel: KernelType::Parallel
        })
    );
    assert_eq!(state, original);

    let matrix = vec![c(0.0); 64];
    assert!(matches!(
        d.apply_matrix(KernelType::Parallel, &mut state, 3, &matrix, &[0, 1, 2], false),
        Err(DispatchError::UnregisteredKernel { .. })
    ));
    assert_eq!(state, original);
}

#[test]
fn matrix_sizes_are_checked() {
    let d = dispatcher();
    let mut state = basis(1, 0);
    assert_eq!(
        d.apply_matrix(KernelType::Reference, &mut state, 1, &[c(1.0); 3], &[0], false),
        Err(DispatchError::IncompatibleMatrixSize {
            num_wires: 1,
            num_qubits: 1,
            expected: 4,
            actual: 3
        })
    );
    assert!(matches!(
        d.apply_matrix(KernelType::Reference, &mut state, 1, &[c(1.0); 16], &[0, 1], false),
        Err(DispatchError::IncompatibleMatrixSize { num_qubits: 1, .. })
    ));
    assert_eq!(state, basis(1, 0));
}

#[test]
fn matrix_application_matches_named_gate() {
    let d = dispatcher();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let hadamard = [c(h), c(h), c(h), c(-h)];
    for kernel in KernelType::ALL {
        let mut by_matrix = basis(2, 0b01);
        let mut by_name = by_matrix.clone();
        d.apply_matrix(kernel, &mut by_matrix, 2, &hadamard, &[1], false).unwrap();
        d.apply_operation(kernel, &mut by_name, 2, "Hadamard", &[1], false, &[]).unwrap();
        assert_close(&by_matrix, &by_name);
    }

    // Three-wire matrices route to the reference kernel's MultiQubitOp.
    let mut state = basis(3, 0b110);
    let mut toffoli = vec![c(0.0); 64];
    for i in 0..6 {
        toffoli[i * 8 + i] = c(1.0);
    }
    toffoli[6 * 8 + 7] = c(1.0);
    toffoli[7 * 8 + 6] = c(1.0);
    d.apply_matrix(KernelType::Reference, &mut state, 3, &toffoli, &[0, 1, 2], false).unwrap();
    assert_close(&state, &basis(3, 0b111));
}

#[test]
fn registry_introspection() {
    let registry = registry();
    assert_eq!(registry.registered_kernels(), vec![KernelType::Reference, KernelType::Parallel]);
    assert_eq!(registry.kernel_from_name("Parallel").unwrap(), KernelType::Parallel);
    assert_eq!(registry.kernel_name(KernelType::Reference).unwrap(), "Reference");

    let reference = registry.registered_operations_for_kernel(KernelType::Reference);
    let parallel = registry.registered_operations_for_kernel(KernelType::Parallel);
    assert!(parallel.is_subset(&reference));
    assert!(reference.contains(&OperationId::Generator(GeneratorOperation::MultiRZ)));
    assert_eq!(
        registry.registered_gates_for_kernel(KernelType::Parallel).len(),
        GateOperation::ALL.into_iter().filter(|&op| ParallelKernel::supports(op)).count()
    );
}

#[test]
fn single_precision_registry() {
    let registry = build_registry(&available_backends::<f32>(&KernelConfig::default()));
    let mut state = vec![Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)];
    Dispatcher::new(&registry)
        .apply_operation(KernelType::Parallel, &mut state, 1, "PauliY", &[0], false, &[])
        .unwrap();
    assert_eq!(state[1], Complex32::new(0.0, 1.0));
}

fn registered_gates() -> Vec<(KernelType, GateOperation)> {
    let registry = registry();
    let mut pairs: Vec<_> = KernelType::ALL
        .into_iter()
        .flat_map(|kernel| {
            registry
                .registered_gates_for_kernel(kernel)
                .into_iter()
                .map(move |op| (kernel, op))
        })
        .collect();
    pairs.sort();
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Applying a gate then its inverse restores the state.
    #[test]
    fn inverse_restores_state(
        pair_index in any::<prop::sample::Index>(),
        seed in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 8),
        wires in Just(vec![0usize, 1, 2]).prop_shuffle(),
        angles in prop::array::uniform3(-6.3f64..6.3),
    ) {
        let pairs = registered_gates();
        let (kernel, op) = pairs[pair_index.index(pairs.len())];
        let wires = &wires[..op.num_wires().unwrap_or(3)];
        let params = &angles[..op.num_params()];

        let original = normalized(&seed);
        let mut state = original.clone();
        let d = dispatcher();
        d.apply_operation(kernel, &mut state, 3, op, wires, false, params).unwrap();
        d.apply_operation(kernel, &mut state, 3, op, wires, true, params).unwrap();
        for (a, e) in state.iter().zip(&original) {
            prop_assert!((a - e).norm() < 1e-9, "{} on {}: {} != {}", op, kernel, a, e);
        }
    }

    /// Dispatch by catalog name and by id agree.
    #[test]
    fn names_and_ids_dispatch_identically(
        op in prop::sample::select(GateOperation::ALL.to_vec()),
        angles in prop::array::uniform3(-3.2f64..3.2),
    ) {
        prop_assert_eq!(GateOperation::from_name(op.name()), Ok(op));
        prop_assert_eq!(op.name().parse::<GateOperation>(), Ok(op));
        prop_assert!(qsim::has_gate_op(op.name()));

        let wires = [2usize, 0, 1];
        let wires = &wires[..op.num_wires().unwrap_or(3)];
        let params = &angles[..op.num_params()];
        let seed = [(0.3, 0.1), (0.2, -0.4), (0.1, 0.1), (0.5, 0.0), (-0.2, 0.3), (0.0, 0.2), (0.4, -0.1), (0.1, 0.3)];
        let mut by_id = normalized(&seed);
        let mut by_name = by_id.clone();
        let d = dispatcher();
        d.apply_operation(KernelType::Reference, &mut by_id, 3, op, wires, false, params).unwrap();
        d.apply_operation(KernelType::Reference, &mut by_name, 3, op.name(), wires, false, params).unwrap();
        prop_assert_eq!(by_id, by_name);
    }
}

#[test]
fn f32_global_is_not_initialized_here() {
    assert_eq!(
        Dispatcher::<f32>::global().err(),
        Some(DispatchError::NotInitialized { precision: "f32" })
    );
}
