//! Tracing/logging setup shared by the teller binaries.

pub use self::tracing::{init, LogFormat, LogSettings};

/// Subscriber configuration (filters, output format).
pub mod tracing;
