//! Boundary with the host record type
//!
//! A host record exposes its timestamps through [`Schedulable`] and receives
//! validation failures through an [`ErrorSink`]. [`FieldErrors`] is a ready
//! made sink, and [`MemoryRecord`] an in-memory record for tests and tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::ScheduleConfig;

/// Read access to a record's nullable timestamp fields
pub trait Schedulable {
    /// Value of `field`, or `None` when it is unset or unknown
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>>;
}

/// Receives `(field, message)` pairs from validation
pub trait ErrorSink {
    fn add_error(&mut self, field: &str, message: String);
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        (**self).timestamp(field)
    }
}

impl Schedulable for BTreeMap<String, DateTime<Utc>> {
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field).copied()
    }
}

impl Schedulable for HashMap<String, DateTime<Utc>> {
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field).copied()
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failures in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported against `field`
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl ErrorSink for FieldErrors {
    fn add_error(&mut self, field: &str, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            message,
        });
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// In-memory record holding named timestamps and its own errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryRecord {
    values: BTreeMap<String, DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    errors: FieldErrors,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (`Some`) or clear (`None`) a field
    pub fn set(&mut self, field: impl Into<String>, value: Option<DateTime<Utc>>) {
        let field = field.into();
        match value {
            Some(value) => {
                self.values.insert(field, value);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: DateTime<Utc>) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Errors left by the last [`valid`](Self::valid) call
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Run a fresh validation pass and report whether it came back clean
    pub fn valid(&mut self, config: &ScheduleConfig) -> bool {
        self.errors.clear();
        config.validate(&self.values, &mut self.errors);
        self.errors.is_empty()
    }
}

impl Schedulable for MemoryRecord {
    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.values.timestamp(field)
    }
}
