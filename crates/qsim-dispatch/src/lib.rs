//! # qsim-dispatch
//!
//! Operation registry and dynamic dispatcher for state-vector simulation.
//!
//! A caller asks to "apply operation O with kernel K to state S on wires W".
//! This crate resolves O (by catalog name or enum id) and K to a routine that
//! a numeric back-end registered at startup, validates what it owns, and
//! invokes the routine on the borrowed state. It never does numeric work
//! itself.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Dispatcher (apply_*)                     │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ (operation, kernel)
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │         KernelRegistry: gates / generators / matrices     │
//! └───────────────────────────┬──────────────────────────────┘
//!              registered once at startup by
//!         ┌───────────────────┼───────────────────┐
//!         ▼                   ▼                   ▼
//!   ┌───────────┐       ┌───────────┐       ┌───────────┐
//!   │ Reference │       │ Parallel  │       │    ...    │
//!   │  backend  │       │  backend  │       │  backend  │
//!   └───────────┘       └───────────┘       └───────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use num_complex::Complex64;
//! use qsim_dispatch::{gate_fn, Dispatcher, GateOperation, KernelRegistry, KernelType};
//!
//! # fn main() -> qsim_dispatch::Result<()> {
//! let mut builder = KernelRegistry::<f64>::builder();
//! builder.register_kernel_name(KernelType::Reference, "Reference");
//! builder.register_gate(
//!     GateOperation::PauliX,
//!     KernelType::Reference,
//!     gate_fn::<f64, _>(|state, _num_qubits, _wires, _inverse, _params| {
//!         state.swap(0, 1);
//!         Ok(())
//!     }),
//! );
//! let registry = builder.build();
//!
//! let mut state = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
//! Dispatcher::new(&registry).apply_operation(KernelType::Reference, &mut state, 1, "PauliX", &[0], false, &[])?;
//! assert_eq!(state[1], Complex64::new(1.0, 0.0));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod dispatcher;
pub mod error;
pub mod global;
pub mod precision;
pub mod registry;
pub mod routine;

pub use catalog::{
    has_gate_op, GateOperation, GeneratorOperation, KernelType, MatrixOperation, OperationFamily, OperationId,
    ToOperation,
};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result, RoutineError};
pub use global::{
    build_registry, get_or_initialize_registry, global_registry, initialize_registry, is_initialized, KernelBackend,
};
pub use precision::Precision;
pub use registry::{KernelRegistry, RegistryBuilder};
pub use routine::{gate_fn, generator_fn, matrix_fn, GateRoutine, GeneratorRoutine, MatrixRoutine, RoutineResult};
