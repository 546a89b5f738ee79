//! Strongly-typed timestamp field names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffixes stripped from a field name to get its display name
const TIMESTAMP_SUFFIXES: [&str; 2] = ["_at", "_on"];

/// Name of a timestamp attribute on a record (e.g. `published_at`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable name with a trailing `_at`/`_on` removed.
    ///
    /// `published_at` -> `published`, `authorized_on` -> `authorized`.
    /// Names without the suffix are returned unchanged.
    pub fn display_name(&self) -> &str {
        TIMESTAMP_SUFFIXES
            .iter()
            .find_map(|suffix| self.0.strip_suffix(suffix))
            .filter(|stem| !stem.is_empty())
            .unwrap_or(self.0.as_str())
    }

    /// Display name turned into a gerund for use in messages.
    ///
    /// Only a past participle before a stripped `_at`/`_on` changes:
    /// `published_at` -> `publishing`. Everything else keeps its display
    /// name (`start_at` -> `start`, `seed_at` -> `seed`, `deadline`).
    pub fn gerund(&self) -> String {
        let stem = self.display_name();
        if stem.len() == self.0.len() {
            return stem.to_string();
        }
        match stem.strip_suffix("ed") {
            Some(root) if !root.is_empty() && !root.ends_with('e') => format!("{}ing", root),
            _ => stem.to_string(),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
