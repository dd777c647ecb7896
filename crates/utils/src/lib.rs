//! Shared utilities for vcapenv
//!
//! Logging setup for the binaries, and masking helpers used wherever
//! credential values may be printed.

pub mod redact;
pub mod tracing;

pub use redact::{is_secret_field, mask_secret, REDACTED};
