//! Process-wide tracing setup for storefront binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use tracing::{LogFormat, init};
