//! Timing spans for kernel and dispatch hot paths.
//!
//! ```rust
//! use qsim_tracing::performance::PerformanceSpan;
//!
//! {
//!     let _span = PerformanceSpan::new("apply_matrix", Some(100));
//!     // ... work ...
//! } // logged only when it took at least 100μs
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use tracing::Level;

static ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

// u64::MAX means "no global threshold".
static GLOBAL_THRESHOLD_US: AtomicU64 = AtomicU64::new(u64::MAX);

/// Switch performance spans on or off process-wide.
pub fn set_enabled(enabled: bool, threshold_us: Option<u64>) {
    ENABLED.store(enabled, Ordering::Relaxed);
    GLOBAL_THRESHOLD_US.store(threshold_us.unwrap_or(u64::MAX), Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

fn global_threshold() -> Option<u64> {
    match GLOBAL_THRESHOLD_US.load(Ordering::Relaxed) {
        u64::MAX => None,
        threshold => Some(threshold),
    }
}

/// RAII timer. Emits one `debug` event with the elapsed time on drop when
/// performance tracing is enabled and the threshold is met.
pub struct PerformanceSpan {
    threshold_us: Option<u64>,
    start_time: Instant,
    span: tracing::Span,
    active: bool,
    // Dropped after the completion event so that event carries the fields.
    fields: Option<tracing::span::EnteredSpan>,
}

impl PerformanceSpan {
    pub fn new(span_name: &str, threshold_us: Option<u64>) -> Self {
        Self::with_level(Level::DEBUG, span_name, threshold_us)
    }

    pub fn with_level(level: Level, span_name: &str, threshold_us: Option<u64>) -> Self {
        let active = is_enabled();
        let span = if active {
            match level {
                Level::TRACE => tracing::trace_span!("perf", name = %span_name),
                Level::DEBUG => tracing::debug_span!("perf", name = %span_name),
                Level::INFO => tracing::info_span!("perf", name = %span_name),
                Level::WARN => tracing::warn_span!("perf", name = %span_name),
                Level::ERROR => tracing::error_span!("perf", name = %span_name),
            }
        } else {
            tracing::Span::none()
        };

        Self {
            threshold_us: threshold_us.or_else(global_threshold),
            start_time: Instant::now(),
            span,
            active,
            fields: None,
        }
    }

    /// Keep an already entered span alive for as long as this timer lives.
    ///
    /// Enter `fields` before calling [`PerformanceSpan::new`] so the timer's
    /// own span is created as its child.
    pub fn with_fields(mut self, fields: tracing::span::EnteredSpan) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for PerformanceSpan {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let elapsed_us = self.elapsed_us();
        if self.threshold_us.is_none_or(|t| elapsed_us >= t) {
            let _entered = self.span.enter();
            tracing::debug!(
                duration_us = elapsed_us,
                duration_ms = elapsed_us as f64 / 1000.0,
                "performance_span_complete"
            );
        }
    }
}
