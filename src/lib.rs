//! # qsim
//!
//! State-vector gate dispatch. Numeric back-ends register routines for each
//! `(operation, kernel)` pair once at startup; afterwards any thread can apply
//! gates, generators and dense matrices through a [`Dispatcher`].
//!
//! ```rust
//! use num_complex::Complex64;
//! use qsim::{Dispatcher, KernelType};
//!
//! # fn main() -> qsim::Result<()> {
//! qsim::initialize::<f64>();
//! let dispatcher = Dispatcher::<f64>::global()?;
//!
//! let mut state = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
//! dispatcher.apply_operation(KernelType::Reference, &mut state, 1, "Hadamard", &[0], false, &[])?;
//! assert!((state[1].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

pub use qsim_dispatch::{
    build_registry, gate_fn, generator_fn, get_or_initialize_registry, global_registry, has_gate_op,
    initialize_registry, is_initialized, matrix_fn, DispatchError, Dispatcher, GateOperation, GateRoutine,
    GeneratorOperation, GeneratorRoutine, KernelBackend, KernelRegistry, KernelType, MatrixOperation, MatrixRoutine,
    OperationFamily, OperationId, Precision, RegistryBuilder, Result, RoutineError, RoutineResult, ToOperation,
};
pub use qsim_kernels::{
    available_backends, initialize, initialize_with, KernelConfig, ParallelKernel, ReferenceKernel,
    DEFAULT_PARALLEL_MIN_QUBITS,
};
pub use qsim_tracing::{init_global_tracing, init_test_tracing, TracingConfig, TracingOutput};

pub mod dispatch {
    pub use qsim_dispatch::*;
}

pub mod kernels {
    pub use qsim_kernels::*;
}
