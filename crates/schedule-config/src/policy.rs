//! Validated policy structures

use crate::schema::RawConfig;
use crate::validation::build_schedule;
use schedule_core::ScheduleConfig;
use schedule_util::ScheduleError;

/// Validated set of schedules, one per record type
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub schedules: Vec<RecordSchedule>,
}

impl Policy {
    /// Convert from raw config (after validation).
    ///
    /// Schedules that fail to build are skipped; `validate_config` reports them.
    pub fn from_raw(raw: RawConfig) -> Self {
        let schedules = raw
            .schedules
            .iter()
            .filter_map(|s| {
                build_schedule(s).ok().map(|config| RecordSchedule {
                    record: s.record.clone(),
                    config,
                })
            })
            .collect();

        Self { schedules }
    }

    /// Get the schedule for a record type
    pub fn get(&self, record: &str) -> Option<&ScheduleConfig> {
        self.schedules
            .iter()
            .find(|s| s.record == record)
            .map(|s| &s.config)
    }

    /// Like [`get`](Self::get), but an unknown record type is an error
    pub fn require(&self, record: &str) -> Result<&ScheduleConfig, ScheduleError> {
        self.get(record)
            .ok_or_else(|| ScheduleError::unknown_record(record))
    }
}

/// Schedule bound to a record type
#[derive(Debug, Clone)]
pub struct RecordSchedule {
    pub record: String,
    pub config: ScheduleConfig,
}
