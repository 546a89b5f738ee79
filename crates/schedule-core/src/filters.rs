//! Filter descriptors for a host query layer
//!
//! One descriptor per window state. Each names the state, carries the
//! predicate as data, and suggests a default ordering. Translating a
//! descriptor into a real query is the host's job.

use chrono::{DateTime, Utc};
use schedule_util::FieldName;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Schedulable, ScheduleConfig, StateKind};

/// Comparison of a field value against the bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `field < bound`
    LessThan,
    /// `field > bound`
    GreaterThan,
}

impl Comparison {
    pub fn holds(self, value: DateTime<Utc>, bound: DateTime<Utc>) -> bool {
        match self {
            Comparison::LessThan => value < bound,
            Comparison::GreaterThan => value > bound,
        }
    }

    /// SQL-style operator symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
        }
    }
}

/// Where the right-hand side of a comparison comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// The instant the host binds when it runs the query (normally "now")
    ReferenceInstant,
}

/// Predicate tree over a record's timestamp fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Compare {
        field: FieldName,
        op: Comparison,
        bound: Bound,
    },
    IsNull {
        field: FieldName,
    },
    All {
        predicates: Vec<Predicate>,
    },
    Any {
        predicates: Vec<Predicate>,
    },
}

impl Predicate {
    fn compare(field: &FieldName, op: Comparison) -> Self {
        Predicate::Compare {
            field: field.clone(),
            op,
            bound: Bound::ReferenceInstant,
        }
    }

    /// Evaluate against an in-memory record with `now` as the bound.
    ///
    /// An unset field fails every comparison, as NULL does in SQL.
    pub fn matches<R: Schedulable + ?Sized>(&self, record: &R, now: DateTime<Utc>) -> bool {
        match self {
            Predicate::Compare { field, op, bound } => {
                let bound = match bound {
                    Bound::ReferenceInstant => now,
                };
                record
                    .timestamp(field.as_str())
                    .is_some_and(|value| op.holds(value, bound))
            }
            Predicate::IsNull { field } => record.timestamp(field.as_str()).is_none(),
            Predicate::All { predicates } => predicates.iter().all(|p| p.matches(record, now)),
            Predicate::Any { predicates } => predicates.iter().any(|p| p.matches(record, now)),
        }
    }

    /// Fields referenced anywhere in the predicate, in order of appearance
    pub fn fields(&self) -> Vec<&FieldName> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldName>) {
        match self {
            Predicate::Compare { field, .. } | Predicate::IsNull { field } => {
                if !out.contains(&field) {
                    out.push(field);
                }
            }
            Predicate::All { predicates } | Predicate::Any { predicates } => {
                for p in predicates {
                    p.collect_fields(out);
                }
            }
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::ReferenceInstant => write!(f, "now"),
        }
    }
}

/// SQL-like rendering, e.g. `published_at < now AND (expired_at IS NULL OR expired_at > now)`
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (joiner, empty, predicates) = match self {
            Predicate::Compare { field, op, bound } => {
                return write!(f, "{} {} {}", field, op.symbol(), bound);
            }
            Predicate::IsNull { field } => return write!(f, "{} IS NULL", field),
            Predicate::All { predicates } => (" AND ", "TRUE", predicates),
            Predicate::Any { predicates } => (" OR ", "FALSE", predicates),
        };

        if predicates.is_empty() {
            return write!(f, "{}", empty);
        }
        for (i, p) in predicates.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", joiner)?;
            }
            match p {
                Predicate::All { predicates } | Predicate::Any { predicates }
                    if predicates.len() > 1 =>
                {
                    write!(f, "({})", p)?
                }
                _ => write!(f, "{}", p)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Default ordering suggested for a filtered listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: FieldName,
    pub direction: SortDirection,
}

/// A named filter a host can register with its query layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// `"scheduled"`, or the start/end display name
    pub name: String,
    pub state: StateKind,
    pub predicate: Predicate,
    pub order: SortOrder,
}

impl ScheduleConfig {
    /// Descriptors for every state this config defines: scheduled, started,
    /// and ended when an end field is configured.
    pub fn filters(&self) -> Vec<FilterDescriptor> {
        self.state_kinds()
            .into_iter()
            .filter_map(|kind| self.filter(kind))
            .collect()
    }

    /// Descriptor for one state, `None` for `Ended` without an end field
    pub fn filter(&self, kind: StateKind) -> Option<FilterDescriptor> {
        let start = self.start_field();
        let (predicate, order_field) = match kind {
            StateKind::Scheduled => (Predicate::compare(start, Comparison::GreaterThan), start),
            StateKind::Started => {
                let opened = Predicate::compare(start, Comparison::LessThan);
                let predicate = match self.end_field() {
                    Some(end) => Predicate::All {
                        predicates: vec![
                            opened,
                            Predicate::Any {
                                predicates: vec![
                                    Predicate::IsNull { field: end.clone() },
                                    Predicate::compare(end, Comparison::GreaterThan),
                                ],
                            },
                        ],
                    },
                    None => opened,
                };
                (predicate, start)
            }
            StateKind::Ended => {
                let end = self.end_field()?;
                (Predicate::compare(end, Comparison::LessThan), end)
            }
        };

        Some(FilterDescriptor {
            name: self.state_name(kind)?.to_string(),
            state: kind,
            predicate,
            order: SortOrder {
                field: order_field.clone(),
                direction: SortDirection::Descending,
            },
        })
    }
}
