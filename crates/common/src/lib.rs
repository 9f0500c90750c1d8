//! Mondrian Common Utilities
//!
//! Shared infrastructure for all Mondrian crates:
//! - Error types and result aliases
//! - Fixed-decimal rounding and clock-time helpers used for sampling
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
