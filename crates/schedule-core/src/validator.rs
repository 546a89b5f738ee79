//! Consistency checks between the start and end timestamps
//!
//! The host calls [`ScheduleConfig::validate`] from its own validation pass.
//! Failures are appended to the host's error sink, never returned as `Err`.

use tracing::debug;

use crate::{ErrorSink, FieldErrors, Role, Schedulable, ScheduleConfig};

impl ScheduleConfig {
    /// Check the record's timestamps and report violations to `errors`.
    ///
    /// All violations are reported against the end field:
    /// - end set but not strictly after start
    /// - end set while start is not
    /// - start set without an end, when the end is required
    ///
    /// Only appends to `errors`; calling it again on an unchanged record
    /// reports the same set.
    pub fn validate<R, S>(&self, record: &R, errors: &mut S)
    where
        R: Schedulable + ?Sized,
        S: ErrorSink + ?Sized,
    {
        let (Some(end_field), Some(end_name)) = (self.end_field(), self.end_name()) else {
            return;
        };

        let start = self.value(record, Role::Start);
        let end = self.value(record, Role::End);

        let mut report = |message: String| {
            debug!(field = %end_field, error = %message, "Schedule validation failed");
            errors.add_error(end_field.as_str(), message);
        };

        match (start, end) {
            (Some(start), Some(end)) if end <= start => report(format!(
                "{} needs to come later than the {} date",
                end_name,
                self.start_gerund()
            )),
            (None, Some(_)) => report(format!(
                "{} not allowed without a {} date",
                end_name,
                self.start_gerund()
            )),
            _ => {}
        }

        if self.end_required() && start.is_some() && end.is_none() {
            report(format!(
                "{} required with a {} date",
                end_name,
                self.start_name()
            ));
        }
    }

    /// Validate into a fresh error collection
    pub fn check<R: Schedulable + ?Sized>(&self, record: &R) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.validate(record, &mut errors);
        errors
    }
}
