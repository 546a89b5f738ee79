//! Clock utilities for schedule windows
//!
//! Every state query takes an explicit reference instant. This module
//! supplies the default one ("now") and parses instants given as text.
//! All instants are UTC.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `SCHEDULE_MOCK_TIME` environment variable can be set
//! to override the system time returned by [`now`]. The mock clock keeps
//! advancing at the real rate from the given starting point.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (UTC, e.g. `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! SCHEDULE_MOCK_TIME="2025-12-25 14:30:00" schedulectl state --record news_item
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::sync::OnceLock;

use crate::{Result, ScheduleError};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "SCHEDULE_MOCK_TIME";

/// Plain date-time format accepted for mock time and CLI input
pub const PLAIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between mock time and real time, computed once per process.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Utc::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, PLAIN_TIMESTAMP_FORMAT) {
                    Ok(naive_dt) => {
                        let offset = Utc
                            .from_utc_datetime(&naive_dt)
                            .signed_duration_since(Utc::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    Err(_) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = PLAIN_TIMESTAMP_FORMAT,
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current instant, respecting mock time settings in debug builds.
///
/// This is the default reference instant for state queries. Code that needs
/// deterministic behavior should pass an explicit instant instead.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Parse an instant from RFC 3339 (`2025-12-25T14:30:00Z`) or the plain
/// `YYYY-MM-DD HH:MM:SS` form, which is read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, PLAIN_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| ScheduleError::invalid_timestamp(value, e.to_string()))
}

/// Format an instant for display with full date and time.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(PLAIN_TIMESTAMP_FORMAT).to_string()
}
