//! Named gate operations

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Catalog, OperationFamily};
use crate::error::DispatchError;

/// Named unitary gates.
///
/// Variants are declared in the same order as [`GATE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GateOperation {
    // ----- Single-qubit -----
    Identity,
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    S,
    T,
    SX,
    PhaseShift,
    RX,
    RY,
    RZ,
    Rot,

    // ----- Two-qubit -----
    CNOT,
    CY,
    CZ,
    SWAP,
    IsingXX,
    IsingYY,
    IsingZZ,
    ControlledPhaseShift,
    CRX,
    CRY,
    CRZ,

    // ----- Three-qubit -----
    Toffoli,
    CSWAP,

    // ----- Arbitrary width -----
    MultiRZ,
}

pub const GATE_NAMES: [(GateOperation, &str); 27] = [
    (GateOperation::Identity, "Identity"),
    (GateOperation::PauliX, "PauliX"),
    (GateOperation::PauliY, "PauliY"),
    (GateOperation::PauliZ, "PauliZ"),
    (GateOperation::Hadamard, "Hadamard"),
    (GateOperation::S, "S"),
    (GateOperation::T, "T"),
    (GateOperation::SX, "SX"),
    (GateOperation::PhaseShift, "PhaseShift"),
    (GateOperation::RX, "RX"),
    (GateOperation::RY, "RY"),
    (GateOperation::RZ, "RZ"),
    (GateOperation::Rot, "Rot"),
    (GateOperation::CNOT, "CNOT"),
    (GateOperation::CY, "CY"),
    (GateOperation::CZ, "CZ"),
    (GateOperation::SWAP, "SWAP"),
    (GateOperation::IsingXX, "IsingXX"),
    (GateOperation::IsingYY, "IsingYY"),
    (GateOperation::IsingZZ, "IsingZZ"),
    (GateOperation::ControlledPhaseShift, "ControlledPhaseShift"),
    (GateOperation::CRX, "CRX"),
    (GateOperation::CRY, "CRY"),
    (GateOperation::CRZ, "CRZ"),
    (GateOperation::Toffoli, "Toffoli"),
    (GateOperation::CSWAP, "CSWAP"),
    (GateOperation::MultiRZ, "MultiRZ"),
];

static CATALOG: LazyLock<Catalog<GateOperation>> = LazyLock::new(|| Catalog::from_table(&GATE_NAMES, ""));

impl GateOperation {
    pub const ALL: [GateOperation; 27] = {
        let mut all = [GateOperation::Identity; 27];
        let mut i = 0;
        while i < GATE_NAMES.len() {
            all[i] = GATE_NAMES[i].0;
            i += 1;
        }
        all
    };

    pub fn name(self) -> &'static str {
        CATALOG.name(self as usize)
    }

    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        CATALOG
            .get(name)
            .ok_or_else(|| DispatchError::unknown_name(OperationFamily::Gate, name))
    }

    /// Number of wires the gate acts on; `None` for arbitrary-width gates.
    pub const fn num_wires(self) -> Option<usize> {
        use GateOperation::*;
        match self {
            Identity | PauliX | PauliY | PauliZ | Hadamard | S | T | SX | PhaseShift | RX | RY | RZ | Rot => Some(1),
            CNOT | CY | CZ | SWAP | IsingXX | IsingYY | IsingZZ | ControlledPhaseShift | CRX | CRY | CRZ => Some(2),
            Toffoli | CSWAP => Some(3),
            MultiRZ => None,
        }
    }

    /// Number of real parameters the gate takes.
    pub const fn num_params(self) -> usize {
        use GateOperation::*;
        match self {
            PhaseShift | RX | RY | RZ | IsingXX | IsingYY | IsingZZ | ControlledPhaseShift | CRX | CRY | CRZ
            | MultiRZ => 1,
            Rot => 3,
            _ => 0,
        }
    }
}

/// Returns true if `name` is a catalogued gate.
pub fn has_gate_op(name: &str) -> bool {
    CATALOG.get(name).is_some()
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateOperation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
