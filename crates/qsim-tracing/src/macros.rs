//! Instrumentation macros used by the kernel crates.

/// Open a [`crate::performance::PerformanceSpan`], optionally recording fields
/// on a `debug` span that stays entered until the timer drops.
///
/// ```rust
/// use qsim_tracing::perf_span;
///
/// let _span = perf_span!("apply_gate", num_qubits = 12, wires = 2);
/// ```
#[macro_export]
macro_rules! perf_span {
    ($name:expr) => {{
        $crate::performance::PerformanceSpan::new($name, None)
    }};
    ($name:expr, $($field:tt = $value:expr),+ $(,)?) => {{
        let fields = tracing::debug_span!(
            "perf",
            name = $name,
            $($field = $value),+
        )
        .entered();
        $crate::performance::PerformanceSpan::new($name, None).with_fields(fields)
    }};
}

/// Run a block and return `(result, elapsed_microseconds)`.
///
/// ```rust
/// use qsim_tracing::timed_block;
///
/// let (sum, _us) = timed_block!("sum", { (1..=10).sum::<i32>() });
/// assert_eq!(sum, 55);
/// ```
#[macro_export]
macro_rules! timed_block {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration_us = start.elapsed().as_micros() as u64;
        tracing::debug!(operation = $name, duration_us = duration_us, "timed_block_complete");
        (result, duration_us)
    }};
}
