//! Per-record-type schedule configuration

use schedule_util::{FieldName, Result, ScheduleError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field used as the start of the window when none is given
pub const DEFAULT_START_FIELD: &str = "published_at";

/// Name of the "start lies in the future" state and filter
pub const SCHEDULED_STATE: &str = "scheduled";

/// Which of the two configured timestamps a query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Start,
    End,
}

/// The start/end timestamp fields of one record type, with the names
/// derived from them.
///
/// Immutable once built; share it freely between threads.
///
/// The state names (`scheduled`, the start display name, the end display
/// name) are also the filter names, so they must all differ. A start field
/// named `scheduled_at`, or a `live_at`/`live_on` pair, is rejected by
/// [`ScheduleConfigBuilder::build`] with [`ScheduleError::DuplicateStateName`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleConfig {
    start_field: FieldName,
    end_field: Option<FieldName>,
    end_required: bool,

    start_name: String,
    start_gerund: String,
    end_name: Option<String>,
}

impl ScheduleConfig {
    /// Config with only a start field
    pub fn new(start_field: impl Into<FieldName>) -> Result<Self> {
        Self::builder(start_field).build()
    }

    pub fn builder(start_field: impl Into<FieldName>) -> ScheduleConfigBuilder {
        ScheduleConfigBuilder {
            start_field: start_field.into(),
            end_field: None,
            end_required: false,
        }
    }

    pub fn start_field(&self) -> &FieldName {
        &self.start_field
    }

    pub fn end_field(&self) -> Option<&FieldName> {
        self.end_field.as_ref()
    }

    pub fn end_required(&self) -> bool {
        self.end_required
    }

    /// Field configured for `role`, if any
    pub fn field(&self, role: Role) -> Option<&FieldName> {
        match role {
            Role::Start => Some(&self.start_field),
            Role::End => self.end_field.as_ref(),
        }
    }

    /// Start field without its `_at`/`_on` suffix, e.g. `published`
    pub fn start_name(&self) -> &str {
        &self.start_name
    }

    /// Start name as used in messages, e.g. `publishing`
    pub fn start_gerund(&self) -> &str {
        &self.start_gerund
    }

    /// End field without its `_at`/`_on` suffix, e.g. `expired`
    pub fn end_name(&self) -> Option<&str> {
        self.end_name.as_deref()
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let start_field = FieldName::new(DEFAULT_START_FIELD);
        Self {
            start_name: start_field.display_name().to_string(),
            start_gerund: start_field.gerund(),
            start_field,
            end_field: None,
            end_required: false,
            end_name: None,
        }
    }
}

/// Builder for [`ScheduleConfig`]; misconfiguration is rejected by `build`.
#[derive(Debug, Clone)]
pub struct ScheduleConfigBuilder {
    start_field: FieldName,
    end_field: Option<FieldName>,
    end_required: bool,
}

impl ScheduleConfigBuilder {
    pub fn end(mut self, end_field: impl Into<FieldName>) -> Self {
        self.end_field = Some(end_field.into());
        self
    }

    /// Require an end value whenever a start value is present
    pub fn end_required(mut self, required: bool) -> Self {
        self.end_required = required;
        self
    }

    pub fn build(self) -> Result<ScheduleConfig> {
        if self.start_field.is_empty() {
            return Err(ScheduleError::EmptyFieldName { role: "start" });
        }

        if let Some(end) = &self.end_field {
            if end.is_empty() {
                return Err(ScheduleError::EmptyFieldName { role: "end" });
            }
            if *end == self.start_field {
                return Err(ScheduleError::SameStartAndEnd(end.clone()));
            }
        }

        if self.end_required && self.end_field.is_none() {
            return Err(ScheduleError::EndRequiredWithoutEnd {
                start: self.start_field,
            });
        }

        let start_name = self.start_field.display_name().to_string();
        let end_name = self
            .end_field
            .as_ref()
            .map(|end| end.display_name().to_string());

        // State names double as filter names, so they have to be distinct.
        let mut names = vec![SCHEDULED_STATE, start_name.as_str()];
        names.extend(end_name.as_deref());
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ScheduleError::DuplicateStateName(name.to_string()));
            }
        }

        debug!(
            start = %self.start_field,
            end = ?self.end_field.as_ref().map(FieldName::as_str),
            end_required = self.end_required,
            "Schedule config built"
        );

        Ok(ScheduleConfig {
            start_gerund: self.start_field.gerund(),
            start_field: self.start_field,
            end_field: self.end_field,
            end_required: self.end_required,
            start_name,
            end_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_published_at() {
        let config = ScheduleConfig::default();
        assert_eq!(config.start_field().as_str(), "published_at");
        assert_eq!(config.start_name(), "published");
        assert_eq!(config.start_gerund(), "publishing");
        assert!(config.end_field().is_none());
        assert!(!config.end_required());
        assert_eq!(config, ScheduleConfig::new("published_at").unwrap());
    }

    #[test]
    fn builder_derives_display_names() {
        let config = ScheduleConfig::builder("authorized_on")
            .end("unauthorized_on")
            .end_required(true)
            .build()
            .unwrap();

        assert_eq!(config.start_name(), "authorized");
        assert_eq!(config.start_gerund(), "authorizing");
        assert_eq!(config.end_name(), Some("unauthorized"));
        assert_eq!(config.field(Role::End).unwrap().as_str(), "unauthorized_on");
        assert!(config.end_required());
    }

    #[test]
    fn end_required_without_end_is_rejected() {
        let result = ScheduleConfig::builder("published_at")
            .end_required(true)
            .build();
        assert!(matches!(
            result,
            Err(ScheduleError::EndRequiredWithoutEnd { .. })
        ));
    }

    #[test]
    fn empty_and_identical_fields_are_rejected() {
        assert_eq!(
            ScheduleConfig::new(""),
            Err(ScheduleError::EmptyFieldName { role: "start" })
        );
        assert_eq!(
            ScheduleConfig::builder("published_at").end("").build(),
            Err(ScheduleError::EmptyFieldName { role: "end" })
        );
        assert!(matches!(
            ScheduleConfig::builder("published_at")
                .end("published_at")
                .build(),
            Err(ScheduleError::SameStartAndEnd(_))
        ));
    }

    #[test]
    fn colliding_state_names_are_rejected() {
        assert_eq!(
            ScheduleConfig::new("scheduled_at"),
            Err(ScheduleError::DuplicateStateName("scheduled".into()))
        );
        assert_eq!(
            ScheduleConfig::builder("live_at").end("live_on").build(),
            Err(ScheduleError::DuplicateStateName("live".into()))
        );
    }

    #[test]
    fn config_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScheduleConfig>();
    }
}
