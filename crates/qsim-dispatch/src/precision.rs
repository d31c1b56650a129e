//! Floating-point precisions the dispatcher is instantiated for

use std::fmt::{Debug, Display};
use std::sync::OnceLock;

use num_traits::{Float, FloatConst};

use crate::registry::KernelRegistry;

/// Real scalar type of amplitudes and gate parameters.
///
/// Implemented for `f32` and `f64`. Each precision owns its own process-wide
/// registry.
pub trait Precision: Float + FloatConst + Default + Debug + Display + Send + Sync + 'static {
    /// Human-readable name used in logs and errors.
    const NAME: &'static str;

    #[doc(hidden)]
    fn registry_cell() -> &'static OnceLock<KernelRegistry<Self>>;
}

impl Precision for f32 {
    const NAME: &'static str = "f32";

    fn registry_cell() -> &'static OnceLock<KernelRegistry<Self>> {
        static REGISTRY: OnceLock<KernelRegistry<f32>> = OnceLock::new();
        &REGISTRY
    }
}

impl Precision for f64 {
    const NAME: &'static str = "f64";

    fn registry_cell() -> &'static OnceLock<KernelRegistry<Self>> {
        static REGISTRY: OnceLock<KernelRegistry<f64>> = OnceLock::new();
        &REGISTRY
    }
}
