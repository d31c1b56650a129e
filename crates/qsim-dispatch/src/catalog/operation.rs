//! Family-tagged operation ids and name/id resolution

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GateOperation, GeneratorOperation, MatrixOperation};
use crate::error::DispatchError;

/// The three disjoint operation namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperationFamily {
    Gate,
    Generator,
    Matrix,
}

impl fmt::Display for OperationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gate => "gate",
            Self::Generator => "generator",
            Self::Matrix => "matrix operation",
        })
    }
}

/// An operation from any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperationId {
    Gate(GateOperation),
    Generator(GeneratorOperation),
    Matrix(MatrixOperation),
}

impl OperationId {
    pub fn family(self) -> OperationFamily {
        match self {
            Self::Gate(_) => OperationFamily::Gate,
            Self::Generator(_) => OperationFamily::Generator,
            Self::Matrix(_) => OperationFamily::Matrix,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gate(op) => op.name(),
            Self::Generator(op) => op.name(),
            Self::Matrix(op) => op.name(),
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family(), self.name())
    }
}

impl From<GateOperation> for OperationId {
    fn from(op: GateOperation) -> Self {
        Self::Gate(op)
    }
}

impl From<GeneratorOperation> for OperationId {
    fn from(op: GeneratorOperation) -> Self {
        Self::Generator(op)
    }
}

impl From<MatrixOperation> for OperationId {
    fn from(op: MatrixOperation) -> Self {
        Self::Matrix(op)
    }
}

/// Something that names an operation of family `Op`: the id itself or its
/// catalog name.
///
/// This is what lets the dispatcher take `"Hadamard"`, `String::from("CNOT")`
/// or `GateOperation::RX` through one entry point.
pub trait ToOperation<Op> {
    fn to_operation(&self) -> Result<Op, DispatchError>;
}

impl ToOperation<GateOperation> for GateOperation {
    fn to_operation(&self) -> Result<GateOperation, DispatchError> {
        Ok(*self)
    }
}

impl ToOperation<GeneratorOperation> for GeneratorOperation {
    fn to_operation(&self) -> Result<GeneratorOperation, DispatchError> {
        Ok(*self)
    }
}

impl ToOperation<GateOperation> for str {
    fn to_operation(&self) -> Result<GateOperation, DispatchError> {
        GateOperation::from_name(self)
    }
}

impl ToOperation<GeneratorOperation> for str {
    fn to_operation(&self) -> Result<GeneratorOperation, DispatchError> {
        GeneratorOperation::from_name(self)
    }
}

impl<Op> ToOperation<Op> for String
where
    str: ToOperation<Op>,
{
    fn to_operation(&self) -> Result<Op, DispatchError> {
        self.as_str().to_operation()
    }
}

impl<Op, X> ToOperation<Op> for &X
where
    X: ToOperation<Op> + ?Sized,
{
    fn to_operation(&self) -> Result<Op, DispatchError> {
        (**self).to_operation()
    }
}
