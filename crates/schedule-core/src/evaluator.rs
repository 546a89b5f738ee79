//! Window state queries
//!
//! Every comparison is strict: a timestamp equal to the reference instant
//! has not been crossed yet, so it is neither scheduled nor started/ended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, SCHEDULED_STATE, Schedulable, ScheduleConfig};

/// The derived boolean states of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    /// Start lies after the reference instant
    Scheduled,
    /// Window is open
    Started,
    /// End lies before the reference instant
    Ended,
}

/// All states of one record at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub scheduled: bool,
    pub started: bool,
    /// `None` when no end field is configured
    pub ended: Option<bool>,
}

impl ScheduleConfig {
    /// Whether the `role` field holds a value strictly after `now`.
    ///
    /// An unset value, or `Role::End` without an end field, is never scheduled.
    pub fn is_scheduled<R: Schedulable + ?Sized>(
        &self,
        record: &R,
        role: Role,
        now: DateTime<Utc>,
    ) -> bool {
        self.value(record, role).is_some_and(|value| value > now)
    }

    /// Whether the window has opened and not yet closed at `now`.
    ///
    /// Start must be set and strictly before `now`; an end, if set, must be
    /// strictly after `now`.
    pub fn is_started<R: Schedulable + ?Sized>(&self, record: &R, now: DateTime<Utc>) -> bool {
        let Some(start) = self.value(record, Role::Start) else {
            return false;
        };
        start < now && self.value(record, Role::End).is_none_or(|end| end > now)
    }

    /// Whether the end is set and strictly before `now`.
    ///
    /// Always false without an end field.
    pub fn is_ended<R: Schedulable + ?Sized>(&self, record: &R, now: DateTime<Utc>) -> bool {
        self.value(record, Role::End).is_some_and(|end| end < now)
    }

    /// Evaluate one state
    pub fn is<R: Schedulable + ?Sized>(
        &self,
        kind: StateKind,
        record: &R,
        now: DateTime<Utc>,
    ) -> bool {
        match kind {
            StateKind::Scheduled => self.is_scheduled(record, Role::Start, now),
            StateKind::Started => self.is_started(record, now),
            StateKind::Ended => self.is_ended(record, now),
        }
    }

    /// Evaluate a state by its derived name (`"scheduled"`, the start name
    /// such as `"published"`, or the end name such as `"expired"`).
    ///
    /// Returns `None` for a name this config does not define.
    pub fn state<R: Schedulable + ?Sized>(
        &self,
        name: &str,
        record: &R,
        now: DateTime<Utc>,
    ) -> Option<bool> {
        self.state_kind(name).map(|kind| self.is(kind, record, now))
    }

    pub fn snapshot<R: Schedulable + ?Sized>(&self, record: &R, now: DateTime<Utc>) -> WindowState {
        WindowState {
            scheduled: self.is_scheduled(record, Role::Start, now),
            started: self.is_started(record, now),
            ended: self
                .end_field()
                .map(|_| self.is_ended(record, now)),
        }
    }

    /// Resolve a derived state name
    pub fn state_kind(&self, name: &str) -> Option<StateKind> {
        self.state_kinds()
            .into_iter()
            .find(|kind| self.state_name(*kind) == Some(name))
    }

    /// Derived name of a state, `None` for `Ended` without an end field
    pub fn state_name(&self, kind: StateKind) -> Option<&str> {
        match kind {
            StateKind::Scheduled => Some(SCHEDULED_STATE),
            StateKind::Started => Some(self.start_name()),
            StateKind::Ended => self.end_name(),
        }
    }

    /// States defined by this config
    pub fn state_kinds(&self) -> Vec<StateKind> {
        let mut kinds = vec![StateKind::Scheduled, StateKind::Started];
        if self.end_field().is_some() {
            kinds.push(StateKind::Ended);
        }
        kinds
    }

    pub(crate) fn value<R: Schedulable + ?Sized>(
        &self,
        record: &R,
        role: Role,
    ) -> Option<DateTime<Utc>> {
        self.field(role)
            .and_then(|field| record.timestamp(field.as_str()))
    }
}
