//! Generic matrix operations, classified by wire count

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Catalog, OperationFamily};
use crate::error::DispatchError;

/// Size class of an arbitrary-matrix application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatrixOperation {
    SingleQubitOp,
    TwoQubitOp,
    MultiQubitOp,
}

pub const MATRIX_NAMES: [(MatrixOperation, &str); 3] = [
    (MatrixOperation::SingleQubitOp, "SingleQubitOp"),
    (MatrixOperation::TwoQubitOp, "TwoQubitOp"),
    (MatrixOperation::MultiQubitOp, "MultiQubitOp"),
];

static CATALOG: LazyLock<Catalog<MatrixOperation>> = LazyLock::new(|| Catalog::from_table(&MATRIX_NAMES, ""));

impl MatrixOperation {
    pub const ALL: [MatrixOperation; 3] = [Self::SingleQubitOp, Self::TwoQubitOp, Self::MultiQubitOp];

    /// 1 wire is `SingleQubitOp`, 2 is `TwoQubitOp`, anything else `MultiQubitOp`.
    pub const fn from_num_wires(num_wires: usize) -> Self {
        match num_wires {
            1 => Self::SingleQubitOp,
            2 => Self::TwoQubitOp,
            _ => Self::MultiQubitOp,
        }
    }

    pub const fn name(self) -> &'static str {
        MATRIX_NAMES[self as usize].1
    }

    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        CATALOG
            .get(name)
            .ok_or_else(|| DispatchError::unknown_name(OperationFamily::Matrix, name))
    }
}

impl fmt::Display for MatrixOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatrixOperation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
