//! Process-wide registry lifecycle
//!
//! There is one registry per [`Precision`]. It moves through three states:
//!
//! ```text
//! Uninitialized --initialize_registry()--> Initializing --build--> Ready
//! ```
//!
//! `initialize_registry` runs the registration pass of every back-end it is
//! given, in order, then publishes the result. The registry can only be
//! published once and is never torn down.
//!
//! # Initialization contract
//!
//! Startup code must finish `initialize_registry` (or
//! [`get_or_initialize_registry`]) before any thread dispatches through
//! [`global_registry`] or [`Dispatcher::global`](crate::Dispatcher::global).
//! After that point the registry is read-only and every thread may use it
//! concurrently without locking. Dispatch before initialization fails with
//! [`DispatchError::NotInitialized`].

use tracing::{debug, info};

use crate::catalog::KernelType;
use crate::error::{DispatchError, Result};
use crate::precision::Precision;
use crate::registry::{KernelRegistry, RegistryBuilder};

/// A numeric back-end that contributes routines for one kernel.
pub trait KernelBackend<T: Precision>: Send + Sync {
    fn kernel(&self) -> KernelType;

    fn display_name(&self) -> &str {
        self.kernel().name()
    }

    /// Register every routine this back-end implements.
    fn register_routines(&self, builder: &mut RegistryBuilder<T>);
}

/// Run the registration pass of `backends` into a fresh registry.
///
/// Back-ends run in slice order, so a later back-end overwrites an earlier
/// one's routine for the same `(operation, kernel)` pair.
pub fn build_registry<T: Precision>(backends: &[Box<dyn KernelBackend<T>>]) -> KernelRegistry<T> {
    let mut builder = RegistryBuilder::new();
    for backend in backends {
        let kernel = backend.kernel();
        debug!(%kernel, name = backend.display_name(), precision = T::NAME, "registering kernel routines");
        builder.register_kernel_name(kernel, backend.display_name());
        backend.register_routines(&mut builder);
    }
    builder.build()
}

/// Build and publish the process-wide registry for `T`.
///
/// Fails with [`DispatchError::AlreadyInitialized`] if it was published before.
pub fn initialize_registry<T: Precision>(backends: &[Box<dyn KernelBackend<T>>]) -> Result<&'static KernelRegistry<T>> {
    let cell = T::registry_cell();
    if cell.get().is_some() {
        return Err(DispatchError::AlreadyInitialized { precision: T::NAME });
    }
    cell.set(build_registry(backends))
        .map_err(|_| DispatchError::AlreadyInitialized { precision: T::NAME })?;
    info!(precision = T::NAME, "kernel registry initialized");
    global_registry()
}

/// Publish the registry for `T` if nobody has yet, and return it.
///
/// Concurrent callers block until the first one finishes, so every caller
/// returns the same fully built registry.
pub fn get_or_initialize_registry<T: Precision>(backends: &[Box<dyn KernelBackend<T>>]) -> &'static KernelRegistry<T> {
    T::registry_cell().get_or_init(|| build_registry(backends))
}

/// The published registry for `T`.
pub fn global_registry<T: Precision>() -> Result<&'static KernelRegistry<T>> {
    T::registry_cell()
        .get()
        .ok_or(DispatchError::NotInitialized { precision: T::NAME })
}

pub fn is_initialized<T: Precision>() -> bool {
    T::registry_cell().get().is_some()
}
