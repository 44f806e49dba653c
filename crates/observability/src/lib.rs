//! Tracing/logging setup shared by binaries and tests.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, UnknownLogFormat};

/// Initialize process-wide tracing with the given fallback filter and format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_directive: &str, format: LogFormat) {
    self::tracing::init(default_directive, format);
}
