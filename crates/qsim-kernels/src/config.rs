//! Back-end selection from the environment
//!
//! | Variable                   | Meaning                                      | Default            |
//! |----------------------------|----------------------------------------------|--------------------|
//! | `QSIM_KERNELS`             | comma-separated kernel names to register     | every kernel       |
//! | `QSIM_PARALLEL_MIN_QUBITS` | smallest register the parallel kernel threads | `14`               |

use std::env;

use qsim_dispatch::{KernelBackend, KernelType, Precision};
use tracing::warn;

use crate::parallel::ParallelKernel;
use crate::reference::ReferenceKernel;

pub const DEFAULT_PARALLEL_MIN_QUBITS: usize = 14;

pub const KERNELS_ENV: &str = "QSIM_KERNELS";
pub const PARALLEL_MIN_QUBITS_ENV: &str = "QSIM_PARALLEL_MIN_QUBITS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Kernels to register, in registration order.
    pub kernels: Vec<KernelType>,
    pub parallel_min_qubits: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            kernels: KernelType::ALL.to_vec(),
            parallel_min_qubits: DEFAULT_PARALLEL_MIN_QUBITS,
        }
    }
}

impl KernelConfig {
    /// Read the configuration from the environment.
    ///
    /// Unknown kernel names and malformed numbers are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var(KERNELS_ENV) {
            let mut kernels = Vec::new();
            for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
                match kernel_from_env_name(name) {
                    Some(kernel) if !kernels.contains(&kernel) => kernels.push(kernel),
                    Some(_) => {}
                    None => warn!(name, variable = KERNELS_ENV, "ignoring unknown kernel name"),
                }
            }
            if kernels.is_empty() {
                warn!(variable = KERNELS_ENV, value = %value, "no usable kernel names, registering all kernels");
            } else {
                config.kernels = kernels;
            }
        }

        if let Ok(value) = env::var(PARALLEL_MIN_QUBITS_ENV) {
            match value.trim().parse() {
                Ok(min_qubits) => config.parallel_min_qubits = min_qubits,
                Err(err) => warn!(%err, variable = PARALLEL_MIN_QUBITS_ENV, value = %value, "ignoring threshold"),
            }
        }

        config
    }

    pub fn with_kernels(mut self, kernels: impl IntoIterator<Item = KernelType>) -> Self {
        self.kernels = kernels.into_iter().collect();
        self
    }

    pub fn with_parallel_min_qubits(mut self, min_qubits: usize) -> Self {
        self.parallel_min_qubits = min_qubits;
        self
    }

    /// The back-ends this configuration selects.
    pub fn backends<T: Precision>(&self) -> Vec<Box<dyn KernelBackend<T>>> {
        self.kernels
            .iter()
            .map(|kernel| -> Box<dyn KernelBackend<T>> {
                match kernel {
                    KernelType::Reference => Box::new(ReferenceKernel),
                    KernelType::Parallel => Box::new(ParallelKernel::new(self.parallel_min_qubits)),
                }
            })
            .collect()
    }
}

/// Environment values are matched against the catalog names ignoring ASCII case.
fn kernel_from_env_name(name: &str) -> Option<KernelType> {
    KernelType::ALL
        .into_iter()
        .find(|kernel| kernel.name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(KERNELS_ENV);
        env::remove_var(PARALLEL_MIN_QUBITS_ENV);
    }

    #[test]
    #[serial]
    fn defaults_without_environment() {
        clear_env();
        assert_eq!(KernelConfig::from_env(), KernelConfig::default());
    }

    #[test]
    #[serial]
    fn reads_kernel_list_and_threshold() {
        clear_env();
        env::set_var(KERNELS_ENV, " parallel, bogus ,Parallel");
        env::set_var(PARALLEL_MIN_QUBITS_ENV, "3");
        let config = KernelConfig::from_env();
        clear_env();

        assert_eq!(config.kernels, vec![KernelType::Parallel]);
        assert_eq!(config.parallel_min_qubits, 3);
    }

    #[test]
    #[serial]
    fn falls_back_on_bad_values() {
        clear_env();
        env::set_var(KERNELS_ENV, "gpu");
        env::set_var(PARALLEL_MIN_QUBITS_ENV, "many");
        let config = KernelConfig::from_env();
        clear_env();

        assert_eq!(config, KernelConfig::default());
    }

    #[test]
    fn env_kernel_names_ignore_case() {
        assert_eq!(kernel_from_env_name("reFERence"), Some(KernelType::Reference));
        assert_eq!(kernel_from_env_name("PARALLEL"), Some(KernelType::Parallel));
        assert_eq!(kernel_from_env_name("gpu"), None);
    }

    #[test]
    fn backends_follow_kernel_order() {
        let config = KernelConfig::default()
            .with_kernels([KernelType::Parallel, KernelType::Reference])
            .with_parallel_min_qubits(2);
        let backends = config.backends::<f64>();
        let kernels: Vec<_> = backends.iter().map(|b| b.kernel()).collect();
        assert_eq!(kernels, vec![KernelType::Parallel, KernelType::Reference]);
    }
}
