//! Static catalogs of operations and kernels
//!
//! Each family is a closed enum backed by a name table. The tables are the
//! single source of truth for names: `from_name(op.name()) == op` holds for
//! every entry, and unknown names fail with
//! [`DispatchError::UnknownOperationName`](crate::DispatchError).
//!
//! | Family | Selected by |
//! |---|---|
//! | [`GateOperation`] | name or id |
//! | [`GeneratorOperation`] | name (gate name without the `Generator` prefix) or id |
//! | [`MatrixOperation`] | number of target wires, or name |
//! | [`KernelType`] | name or id |

mod gates;
mod generators;
mod kernels;
mod matrices;
mod operation;

pub use gates::{has_gate_op, GateOperation, GATE_NAMES};
pub use generators::{GeneratorOperation, GENERATOR_NAMES, GENERATOR_PREFIX};
pub use kernels::{KernelType, KERNEL_NAMES};
pub use matrices::{MatrixOperation, MATRIX_NAMES};
pub use operation::{OperationFamily, OperationId, ToOperation};

use std::collections::HashMap;
use std::hash::Hash;

/// Name lookup built once from a static `(op, name)` table.
///
/// Tables are ordered by discriminant, so `names[op as usize]` is the name of `op`.
pub(crate) struct Catalog<Op: 'static> {
    names: Vec<&'static str>,
    by_name: HashMap<&'static str, Op>,
}

impl<Op: Copy + Eq + Hash> Catalog<Op> {
    /// Build from `table`, removing `prefix` from every name that carries it.
    pub(crate) fn from_table(table: &'static [(Op, &'static str)], prefix: &str) -> Self {
        let names: Vec<&'static str> = table
            .iter()
            .map(|(_, name)| name.strip_prefix(prefix).unwrap_or(name))
            .collect();
        let by_name = table
            .iter()
            .zip(names.iter())
            .map(|((op, _), name)| (*name, *op))
            .collect();
        Self { names, by_name }
    }

    pub(crate) fn name(&self, index: usize) -> &'static str {
        self.names[index]
    }

    pub(crate) fn get(&self, name: &str) -> Option<Op> {
        self.by_name.get(name).copied()
    }
}
