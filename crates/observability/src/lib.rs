//! Tracing/logging setup shared by every binary and test harness.

pub mod logging;

pub use logging::{LOG_FORMAT_VAR, LogFormat};

/// Initialize process-wide logging, with the format taken from
/// `CATALOG_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    logging::init_with(LogFormat::from_env());
}
