//! Provides types and functions that are shared by the renderer library and its binaries.
#![deny(missing_docs)]
#[cfg(feature = "telemetry")]
pub mod telemetry;
