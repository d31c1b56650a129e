//! Error types for catalog lookups, registry access and dispatch

use crate::catalog::{KernelType, OperationFamily, OperationId};

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors raised by the dispatcher and the registry.
///
/// Every variant except [`DispatchError::Routine`] is raised before any
/// routine runs, so the state vector is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// Name not present in the catalog of the given family
    #[error("unknown {family} name: {name:?}")]
    UnknownOperationName { family: OperationFamily, name: String },

    /// Name does not belong to any kernel
    #[error("unknown kernel name: {0:?}")]
    UnknownKernelName(String),

    /// The operation exists but the kernel has no routine for it
    #[error("no routine for {operation} is registered under kernel {kernel}")]
    UnregisteredKernel { operation: OperationId, kernel: KernelType },

    /// The kernel never registered a display name
    #[error("kernel {0} has no registered display name")]
    UnnamedKernel(KernelType),

    /// Parallel argument sequences of a batched call disagree in length
    #[error(
        "argument count mismatch: {operations} operations, {wires} wire lists, {inverses} inverse flags, {} parameter lists",
        .params.map_or_else(|| "no".to_string(), |count| count.to_string())
    )]
    ArgumentCountMismatch {
        operations: usize,
        wires: usize,
        inverses: usize,
        params: Option<usize>,
    },

    /// Matrix does not have `4^num_wires` entries, or the wires do not fit the state
    #[error("matrix with {actual} entries does not fit {num_wires} wire(s) of a {num_qubits}-qubit state (expected {expected} entries)")]
    IncompatibleMatrixSize {
        num_wires: usize,
        num_qubits: usize,
        expected: usize,
        actual: usize,
    },

    /// Validation failure reported by the invoked routine
    #[error("kernel routine rejected the call: {0}")]
    Routine(#[from] RoutineError),

    /// The process-wide registry for this precision has not been built yet
    #[error("the {precision} kernel registry is not initialized")]
    NotInitialized { precision: &'static str },

    /// The process-wide registry for this precision was already built
    #[error("the {precision} kernel registry is already initialized")]
    AlreadyInitialized { precision: &'static str },
}

/// Validation failures raised inside numeric routines.
///
/// The dispatcher does not check per-gate arity; routines do and report
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutineError {
    #[error("state vector has {actual} amplitudes, a {num_qubits}-qubit state needs {expected}")]
    StateLength {
        num_qubits: usize,
        expected: usize,
        actual: usize,
    },

    #[error("wire {wire} is out of range for a {num_qubits}-qubit state")]
    WireOutOfRange { wire: usize, num_qubits: usize },

    #[error("wire {wire} is listed more than once")]
    DuplicateWire { wire: usize },

    #[error("{operation} acts on {expected} wire(s), got {actual}")]
    WireCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{operation} needs at least one wire")]
    EmptyWires { operation: &'static str },

    #[error("{operation} takes {expected} parameter(s), got {actual}")]
    ParamCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl DispatchError {
    pub fn unknown_name(family: OperationFamily, name: impl Into<String>) -> Self {
        Self::UnknownOperationName {
            family,
            name: name.into(),
        }
    }

    pub fn unregistered(operation: impl Into<OperationId>, kernel: KernelType) -> Self {
        Self::UnregisteredKernel {
            operation: operation.into(),
            kernel,
        }
    }
}
