//! Generator operations of parametrized gates

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Catalog, GateOperation, OperationFamily};
use crate::error::DispatchError;

/// Prefix carried by the static generator names and stripped from catalog names.
pub const GENERATOR_PREFIX: &str = "Generator";

/// Generators, one per parametrized gate.
///
/// Variants are declared in the same order as [`GENERATOR_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeneratorOperation {
    PhaseShift,
    RX,
    RY,
    RZ,
    IsingXX,
    IsingYY,
    IsingZZ,
    ControlledPhaseShift,
    CRX,
    CRY,
    CRZ,
    MultiRZ,
}

pub const GENERATOR_NAMES: [(GeneratorOperation, &str); 12] = [
    (GeneratorOperation::PhaseShift, "GeneratorPhaseShift"),
    (GeneratorOperation::RX, "GeneratorRX"),
    (GeneratorOperation::RY, "GeneratorRY"),
    (GeneratorOperation::RZ, "GeneratorRZ"),
    (GeneratorOperation::IsingXX, "GeneratorIsingXX"),
    (GeneratorOperation::IsingYY, "GeneratorIsingYY"),
    (GeneratorOperation::IsingZZ, "GeneratorIsingZZ"),
    (GeneratorOperation::ControlledPhaseShift, "GeneratorControlledPhaseShift"),
    (GeneratorOperation::CRX, "GeneratorCRX"),
    (GeneratorOperation::CRY, "GeneratorCRY"),
    (GeneratorOperation::CRZ, "GeneratorCRZ"),
    (GeneratorOperation::MultiRZ, "GeneratorMultiRZ"),
];

static CATALOG: LazyLock<Catalog<GeneratorOperation>> =
    LazyLock::new(|| Catalog::from_table(&GENERATOR_NAMES, GENERATOR_PREFIX));

impl GeneratorOperation {
    pub const ALL: [GeneratorOperation; 12] = {
        let mut all = [GeneratorOperation::PhaseShift; 12];
        let mut i = 0;
        while i < GENERATOR_NAMES.len() {
            all[i] = GENERATOR_NAMES[i].0;
            i += 1;
        }
        all
    };

    /// Catalog name, e.g. `"RX"`.
    pub fn name(self) -> &'static str {
        CATALOG.name(self as usize)
    }

    /// Static name including the prefix, e.g. `"GeneratorRX"`.
    pub fn full_name(self) -> &'static str {
        GENERATOR_NAMES[self as usize].1
    }

    /// Resolve a name without the `Generator` prefix.
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        CATALOG
            .get(name)
            .ok_or_else(|| DispatchError::unknown_name(OperationFamily::Generator, name))
    }

    /// The parametrized gate this generator belongs to.
    pub const fn gate(self) -> GateOperation {
        match self {
            Self::PhaseShift => GateOperation::PhaseShift,
            Self::RX => GateOperation::RX,
            Self::RY => GateOperation::RY,
            Self::RZ => GateOperation::RZ,
            Self::IsingXX => GateOperation::IsingXX,
            Self::IsingYY => GateOperation::IsingYY,
            Self::IsingZZ => GateOperation::IsingZZ,
            Self::ControlledPhaseShift => GateOperation::ControlledPhaseShift,
            Self::CRX => GateOperation::CRX,
            Self::CRY => GateOperation::CRY,
            Self::CRZ => GateOperation::CRZ,
            Self::MultiRZ => GateOperation::MultiRZ,
        }
    }

    /// The generator of `gate`, if it has one.
    pub fn for_gate(gate: GateOperation) -> Option<Self> {
        Self::ALL.into_iter().find(|gntr| gntr.gate() == gate)
    }
}

impl fmt::Display for GeneratorOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorOperation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_drop_the_prefix() {
        assert_eq!(GeneratorOperation::RX.name(), "RX");
        assert_eq!(GeneratorOperation::RX.full_name(), "GeneratorRX");
        assert_eq!(GeneratorOperation::from_name("IsingZZ").unwrap(), GeneratorOperation::IsingZZ);
        assert!(GeneratorOperation::from_name("GeneratorRX").is_err());
    }

    #[test]
    fn generator_names_match_gate_names() {
        for gntr in GeneratorOperation::ALL {
            assert_eq!(gntr.name(), gntr.gate().name());
            assert_eq!(GeneratorOperation::for_gate(gntr.gate()), Some(gntr));
        }
    }

    #[test]
    fn only_parametrized_gates_have_generators() {
        for gate in GateOperation::ALL {
            if let Some(gntr) = GeneratorOperation::for_gate(gate) {
                assert!(gate.num_params() > 0, "{gntr} belongs to a parameter-free gate");
            }
        }
        assert_eq!(GeneratorOperation::for_gate(GateOperation::Rot), None);
        assert_eq!(GeneratorOperation::for_gate(GateOperation::Hadamard), None);
    }

    #[test]
    fn unknown_generator_reports_family() {
        let err = "Hadamard".parse::<GeneratorOperation>().unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownOperationName {
                family: OperationFamily::Generator,
                ..
            }
        ));
    }
}
