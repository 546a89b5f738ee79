//! Schedule windows over a record's start/end timestamps
//!
//! This crate contains:
//! - Per-record-type configuration (start field, optional end field)
//! - State queries (scheduled / started / ended) against an explicit instant
//! - Validation of start/end consistency, reported through an error sink
//! - Filter descriptors for a host query layer
//!
//! Nothing here performs I/O or reads the clock; callers pass the
//! reference instant (see `schedule_util::now`).

mod config;
mod evaluator;
mod filters;
mod record;
mod validator;

pub use config::*;
pub use evaluator::*;
pub use filters::*;
pub use record::*;
