//! Kernel function registry
//!
//! The registry maps `(operation, kernel)` pairs to routines. It has two
//! phases, expressed as two types:
//!
//! ```text
//! RegistryBuilder<T>  --build()-->  KernelRegistry<T>
//!   (initializing:                    (ready: immutable,
//!    register_* accepted)              lookups and dispatch)
//! ```
//!
//! A [`KernelRegistry`] has no mutating methods, so once built it can be
//! shared across threads and read without locking.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, info};

use crate::catalog::{GateOperation, GeneratorOperation, KernelType, MatrixOperation, OperationId};
use crate::error::{DispatchError, Result};
use crate::precision::Precision;
use crate::routine::{GateRoutine, GeneratorRoutine, MatrixRoutine};

type GateTable<T> = HashMap<(GateOperation, KernelType), Box<dyn GateRoutine<T>>>;
type GeneratorTable<T> = HashMap<(GeneratorOperation, KernelType), Box<dyn GeneratorRoutine<T>>>;
type MatrixTable<T> = HashMap<(MatrixOperation, KernelType), Box<dyn MatrixRoutine<T>>>;

/// Registration phase of the registry.
///
/// Registering the same `(operation, kernel)` pair twice replaces the earlier
/// routine; the replacement is logged at `debug` level.
pub struct RegistryBuilder<T: Precision> {
    gates: GateTable<T>,
    generators: GeneratorTable<T>,
    matrices: MatrixTable<T>,
    kernel_names: HashMap<KernelType, String>,
}

impl<T: Precision> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Precision> RegistryBuilder<T> {
    pub fn new() -> Self {
        Self {
            gates: HashMap::new(),
            generators: HashMap::new(),
            matrices: HashMap::new(),
            kernel_names: HashMap::new(),
        }
    }

    /// Record the display name of `kernel`. Later calls replace the name.
    pub fn register_kernel_name(&mut self, kernel: KernelType, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if let Some(previous) = self.kernel_names.insert(kernel, name.clone()) {
            debug!(%kernel, %previous, %name, "replaced kernel display name");
        }
        self
    }

    pub fn register_gate<R>(&mut self, op: GateOperation, kernel: KernelType, routine: R) -> &mut Self
    where
        R: GateRoutine<T> + 'static,
    {
        if self.gates.insert((op, kernel), Box::new(routine)).is_some() {
            debug!(operation = %op, %kernel, "replaced gate routine");
        }
        self
    }

    pub fn register_generator<R>(&mut self, op: GeneratorOperation, kernel: KernelType, routine: R) -> &mut Self
    where
        R: GeneratorRoutine<T> + 'static,
    {
        if self.generators.insert((op, kernel), Box::new(routine)).is_some() {
            debug!(operation = %op, %kernel, "replaced generator routine");
        }
        self
    }

    pub fn register_matrix<R>(&mut self, op: MatrixOperation, kernel: KernelType, routine: R) -> &mut Self
    where
        R: MatrixRoutine<T> + 'static,
    {
        if self.matrices.insert((op, kernel), Box::new(routine)).is_some() {
            debug!(operation = %op, %kernel, "replaced matrix routine");
        }
        self
    }

    /// Existence check during registration.
    pub fn is_registered(&self, op: impl Into<OperationId>, kernel: KernelType) -> bool {
        contains(&self.gates, &self.generators, &self.matrices, op.into(), kernel)
    }

    /// Close the registration phase.
    pub fn build(self) -> KernelRegistry<T> {
        info!(
            precision = T::NAME,
            kernels = self.kernel_names.len(),
            gates = self.gates.len(),
            generators = self.generators.len(),
            matrices = self.matrices.len(),
            "kernel registry built"
        );
        KernelRegistry {
            gates: self.gates,
            generators: self.generators,
            matrices: self.matrices,
            kernel_names: self.kernel_names,
        }
    }
}

/// Ready phase of the registry: immutable and `Sync`.
pub struct KernelRegistry<T: Precision> {
    gates: GateTable<T>,
    generators: GeneratorTable<T>,
    matrices: MatrixTable<T>,
    kernel_names: HashMap<KernelType, String>,
}

impl<T: Precision> KernelRegistry<T> {
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    /// Kernels with a registered display name, in catalog order.
    pub fn registered_kernels(&self) -> Vec<KernelType> {
        let mut kernels: Vec<KernelType> = self.kernel_names.keys().copied().collect();
        kernels.sort();
        kernels
    }

    pub fn is_registered_kernel(&self, kernel: KernelType) -> bool {
        self.kernel_names.contains_key(&kernel)
    }

    pub fn kernel_name(&self, kernel: KernelType) -> Result<&str> {
        self.kernel_names
            .get(&kernel)
            .map(String::as_str)
            .ok_or(DispatchError::UnnamedKernel(kernel))
    }

    /// Resolve a registered display name back to its kernel.
    ///
    /// If several kernels share a display name, the first in catalog order wins.
    pub fn kernel_from_name(&self, name: &str) -> Result<KernelType> {
        self.registered_kernels()
            .into_iter()
            .find(|kernel| self.kernel_names.get(kernel).is_some_and(|registered| registered == name))
            .ok_or_else(|| DispatchError::UnknownKernelName(name.to_string()))
    }

    /// Whether a routine exists for `op` under `kernel`, for any family.
    pub fn is_registered(&self, op: impl Into<OperationId>, kernel: KernelType) -> bool {
        contains(&self.gates, &self.generators, &self.matrices, op.into(), kernel)
    }

    pub fn registered_gates_for_kernel(&self, kernel: KernelType) -> HashSet<GateOperation> {
        keys_for_kernel(&self.gates, kernel)
    }

    pub fn registered_generators_for_kernel(&self, kernel: KernelType) -> HashSet<GeneratorOperation> {
        keys_for_kernel(&self.generators, kernel)
    }

    pub fn registered_matrices_for_kernel(&self, kernel: KernelType) -> HashSet<MatrixOperation> {
        keys_for_kernel(&self.matrices, kernel)
    }

    /// Every operation of every family with a routine under `kernel`.
    pub fn registered_operations_for_kernel(&self, kernel: KernelType) -> HashSet<OperationId> {
        let gates = self.registered_gates_for_kernel(kernel).into_iter().map(OperationId::from);
        let generators = self
            .registered_generators_for_kernel(kernel)
            .into_iter()
            .map(OperationId::from);
        let matrices = self
            .registered_matrices_for_kernel(kernel)
            .into_iter()
            .map(OperationId::from);
        gates.chain(generators).chain(matrices).collect()
    }

    /// Total number of registered routines across all families.
    pub fn len(&self) -> usize {
        self.gates.len() + self.generators.len() + self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn gate_routine(&self, op: GateOperation, kernel: KernelType) -> Result<&dyn GateRoutine<T>> {
        self.gates
            .get(&(op, kernel))
            .map(Box::as_ref)
            .ok_or_else(|| DispatchError::unregistered(op, kernel))
    }

    pub(crate) fn generator_routine(
        &self,
        op: GeneratorOperation,
        kernel: KernelType,
    ) -> Result<&dyn GeneratorRoutine<T>> {
        self.generators
            .get(&(op, kernel))
            .map(Box::as_ref)
            .ok_or_else(|| DispatchError::unregistered(op, kernel))
    }

    pub(crate) fn matrix_routine(&self, op: MatrixOperation, kernel: KernelType) -> Result<&dyn MatrixRoutine<T>> {
        self.matrices
            .get(&(op, kernel))
            .map(Box::as_ref)
            .ok_or_else(|| DispatchError::unregistered(op, kernel))
    }
}

impl<T: Precision> fmt::Debug for KernelRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelRegistry")
            .field("precision", &T::NAME)
            .field("kernels", &self.registered_kernels())
            .field("gates", &self.gates.len())
            .field("generators", &self.generators.len())
            .field("matrices", &self.matrices.len())
            .finish()
    }
}

fn contains<T: Precision>(
    gates: &GateTable<T>,
    generators: &GeneratorTable<T>,
    matrices: &MatrixTable<T>,
    op: OperationId,
    kernel: KernelType,
) -> bool {
    match op {
        OperationId::Gate(op) => gates.contains_key(&(op, kernel)),
        OperationId::Generator(op) => generators.contains_key(&(op, kernel)),
        OperationId::Matrix(op) => matrices.contains_key(&(op, kernel)),
    }
}

fn keys_for_kernel<Op: Copy + Eq + std::hash::Hash, V>(table: &HashMap<(Op, KernelType), V>, kernel: KernelType) -> HashSet<Op> {
    table
        .keys()
        .filter(|(_, k)| *k == kernel)
        .map(|(op, _)| *op)
        .collect()
}
