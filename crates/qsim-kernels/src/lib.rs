//! # qsim-kernels
//!
//! Numeric back-ends for [`qsim_dispatch`].
//!
//! - [`ReferenceKernel`]: dense scalar implementation of every gate,
//!   generator and matrix class.
//! - [`ParallelKernel`]: strided rayon implementation of the one- and
//!   two-wire gates and matrices.
//!
//! [`initialize`] registers the back-ends selected by [`KernelConfig::from_env`]
//! into the process-wide registry for a precision.

pub mod apply;
pub mod config;
pub mod matrices;
pub mod parallel;
pub mod reference;
pub mod validate;

use qsim_dispatch::{get_or_initialize_registry, KernelBackend, KernelRegistry, Precision};

pub use config::{KernelConfig, DEFAULT_PARALLEL_MIN_QUBITS};
pub use parallel::ParallelKernel;
pub use reference::ReferenceKernel;

/// Every back-end in this crate, configured by `config`.
pub fn available_backends<T: Precision>(config: &KernelConfig) -> Vec<Box<dyn KernelBackend<T>>> {
    config.backends()
}

/// Initialize the global registry for `T` from the environment.
pub fn initialize<T: Precision>() -> &'static KernelRegistry<T> {
    initialize_with(&KernelConfig::from_env())
}

/// Initialize the global registry for `T` with an explicit configuration.
///
/// If the registry was already published, that registry is returned and
/// `config` is ignored.
pub fn initialize_with<T: Precision>(config: &KernelConfig) -> &'static KernelRegistry<T> {
    get_or_initialize_registry(&available_backends(config))
}
