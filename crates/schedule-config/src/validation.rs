//! Configuration validation

use crate::schema::{RawConfig, RawSchedule};
use schedule_core::{DEFAULT_START_FIELD, ScheduleConfig};
use schedule_util::ScheduleError;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Schedule '{record}': {source}")]
    InvalidSchedule {
        record: String,
        #[source]
        source: ScheduleError,
    },

    #[error("Duplicate record: {0}")]
    DuplicateRecord(String),

    #[error("Schedule record name cannot be empty")]
    EmptyRecordName,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for schedule in &config.schedules {
        if schedule.record.trim().is_empty() {
            errors.push(ValidationError::EmptyRecordName);
            continue;
        }
        if !seen.insert(schedule.record.as_str()) {
            errors.push(ValidationError::DuplicateRecord(schedule.record.clone()));
        }
    }

    for schedule in &config.schedules {
        if let Err(source) = build_schedule(schedule) {
            errors.push(ValidationError::InvalidSchedule {
                record: schedule.record.clone(),
                source,
            });
        }
    }

    errors
}

/// Build the schedule config for one raw schedule
pub fn build_schedule(raw: &RawSchedule) -> Result<ScheduleConfig, ScheduleError> {
    let start = raw.start.as_deref().unwrap_or(DEFAULT_START_FIELD);
    let mut builder = ScheduleConfig::builder(start).end_required(raw.end_required);
    if let Some(end) = &raw.end {
        builder = builder.end(end.as_str());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(record: &str, start: Option<&str>, end: Option<&str>, end_required: bool) -> RawSchedule {
        RawSchedule {
            record: record.into(),
            start: start.map(String::from),
            end: end.map(String::from),
            end_required,
        }
    }

    #[test]
    fn test_build_schedule_defaults_start() {
        let config = build_schedule(&schedule("news_item", None, Some("expired_at"), false)).unwrap();
        assert_eq!(config.start_field().as_str(), "published_at");
        assert_eq!(config.end_name(), Some("expired"));
    }

    #[test]
    fn test_duplicate_record_detection() {
        let config = RawConfig {
            config_version: 1,
            schedules: vec![
                schedule("news_item", None, None, false),
                schedule("news_item", Some("posted_at"), None, false),
            ],
        };

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ValidationError::DuplicateRecord(r) if r == "news_item"));
    }

    #[test]
    fn test_end_required_without_end() {
        let config = RawConfig {
            config_version: 1,
            schedules: vec![schedule("admin", Some("authorized_on"), None, true)],
        };

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidSchedule {
                source: ScheduleError::EndRequiredWithoutEnd { .. },
                ..
            }
        )));
        assert!(errors[0].to_string().starts_with("Schedule 'admin':"));
    }

    #[test]
    fn test_collects_every_problem() {
        let config = RawConfig {
            config_version: 1,
            schedules: vec![
                schedule("", None, None, false),
                schedule("a", Some("x_at"), Some("x_at"), false),
                schedule("b", Some(""), None, false),
            ],
        };

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::EmptyRecordName));
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let config = RawConfig {
            config_version: 1,
            schedules: vec![
                schedule("news_item", None, None, false),
                schedule("admin", Some("authorized_on"), Some("unauthorized_on"), true),
            ],
        };
        assert!(validate_config(&config).is_empty());
    }
}
