//! Kernel identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Numeric implementation strategies.
///
/// The canonical name here is what back-ends register as their display name
/// by default; the registry is the authority on which kernels are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KernelType {
    /// Scalar reference implementation covering the whole catalog
    Reference,
    /// Rayon-parallel strided updates for one- and two-wire operations
    Parallel,
}

pub const KERNEL_NAMES: [(KernelType, &str); 2] = [(KernelType::Reference, "Reference"), (KernelType::Parallel, "Parallel")];

impl KernelType {
    pub const ALL: [KernelType; 2] = [Self::Reference, Self::Parallel];

    pub const fn name(self) -> &'static str {
        KERNEL_NAMES[self as usize].1
    }

    /// Resolve a canonical kernel name. Matching is exact.
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        KERNEL_NAMES
            .iter()
            .find(|(_, candidate)| *candidate == name)
            .map(|(kernel, _)| *kernel)
            .ok_or_else(|| DispatchError::UnknownKernelName(name.to_string()))
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
