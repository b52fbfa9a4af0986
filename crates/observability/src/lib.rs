//! Tracing/logging setup shared by the `splitledger` binaries.

/// Initialize process-wide logging with the format taken from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
