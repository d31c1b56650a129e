//! Concurrent initialization and dispatch

use std::thread;

use num_complex::{Complex32, Complex64};
use qsim::{Dispatcher, KernelConfig, KernelRegistry, KernelType};

#[test]
fn racing_initializers_publish_one_registry() {
    let config = KernelConfig::default().with_parallel_min_qubits(2);
    let registries: Vec<&'static KernelRegistry<f32>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| qsim::initialize_with::<f32>(&config)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for registry in &registries {
        assert!(std::ptr::eq(*registry, registries[0]));
    }
    assert!(qsim::is_initialized::<f32>());

    let mut state = vec![Complex32::new(1.0, 0.0), Complex32::new(0.0, 0.0)];
    Dispatcher::<f32>::global()
        .unwrap()
        .apply_operation(KernelType::Reference, &mut state, 1, "PauliX", &[0], false, &[])
        .unwrap();
    assert_eq!(state[1], Complex32::new(1.0, 0.0));
}

#[test]
fn threads_dispatch_on_private_states() {
    qsim::initialize_with::<f64>(&KernelConfig::default().with_parallel_min_qubits(3));
    let dispatcher = Dispatcher::<f64>::global().unwrap();
    let num_qubits = 4;

    let results: Vec<Vec<Complex64>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_qubits)
            .flat_map(|wire| KernelType::ALL.map(|kernel| (wire, kernel)))
            .map(|(wire, kernel)| {
                scope.spawn(move || {
                    let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
                    state[0] = Complex64::new(1.0, 0.0);
                    for _ in 0..50 {
                        dispatcher
                            .apply_operation(kernel, &mut state, num_qubits, "PauliX", &[wire], false, &[])
                            .unwrap();
                    }
                    dispatcher
                        .apply_operation(kernel, &mut state, num_qubits, "PauliX", &[wire], false, &[])
                        .unwrap();
                    state
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // 51 flips of one wire leave exactly that bit set.
    for (i, state) in results.iter().enumerate() {
        let wire = i / KernelType::ALL.len();
        let set = 1usize << (num_qubits - 1 - wire);
        assert_eq!(state[set], Complex64::new(1.0, 0.0), "wire {wire}");
        assert_eq!(state.iter().filter(|a| a.norm() > 0.0).count(), 1);
    }
}
