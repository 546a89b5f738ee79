//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// One schedule per record type
    #[serde(default)]
    pub schedules: Vec<RawSchedule>,
}

/// Raw schedule definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSchedule {
    /// Record type the schedule applies to (e.g. "news_item")
    pub record: String,

    /// Start timestamp field (default: published_at)
    pub start: Option<String>,

    /// End timestamp field
    pub end: Option<String>,

    /// Require an end whenever a start is set
    #[serde(default)]
    pub end_required: bool,
}
