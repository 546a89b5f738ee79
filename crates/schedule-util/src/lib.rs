//! Shared utilities for schedule windows
//!
//! This crate provides:
//! - Field name type with display/gerund name derivation
//! - Clock utilities (injectable "now", mock time, timestamp parsing)
//! - Error types
//! - Default config path

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
