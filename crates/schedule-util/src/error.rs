//! Error types for schedule windows

use thiserror::Error;

use crate::FieldName;

/// Core error type for schedule configuration and input handling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("end_required is set but no end field is configured (start: {start})")]
    EndRequiredWithoutEnd { start: FieldName },

    #[error("{role} field name cannot be empty")]
    EmptyFieldName { role: &'static str },

    #[error("start and end cannot both be '{0}'")]
    SameStartAndEnd(FieldName),

    #[error("state name '{0}' is derived from more than one field")]
    DuplicateStateName(String),

    #[error("Unknown record type: {0}")]
    UnknownRecord(String),

    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },
}

impl ScheduleError {
    pub fn unknown_record(name: impl Into<String>) -> Self {
        Self::UnknownRecord(name.into())
    }

    pub fn invalid_timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = ScheduleError::EndRequiredWithoutEnd {
            start: FieldName::new("authorized_on"),
        };
        assert!(err.to_string().contains("authorized_on"));

        let err = ScheduleError::SameStartAndEnd(FieldName::new("published_at"));
        assert_eq!(err.to_string(), "start and end cannot both be 'published_at'");
    }

    #[test]
    fn helper_constructors() {
        assert_eq!(
            ScheduleError::unknown_record("news_item"),
            ScheduleError::UnknownRecord("news_item".into())
        );
        assert!(matches!(
            ScheduleError::invalid_timestamp("nope", "bad format"),
            ScheduleError::InvalidTimestamp { .. }
        ));
    }
}
