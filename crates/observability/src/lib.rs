//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{LogFormat, LogTarget, ObservabilityConfig};

/// Initialize process-wide observability with an explicit configuration.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(config: &ObservabilityConfig) {
    crate::tracing::init(config);
}
