//! Tracing and logging (shared setup for binaries).
//!
//! Library crates in this workspace only emit `tracing` events; installing a
//! subscriber is the job of whatever process hosts the engine.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&ObservabilityConfig::from_env());
}
