//! Integration tests for schedule windows
//!
//! Load a config file, then drive records through evaluation, validation
//! and the filter descriptors the way a host application would.

use chrono::{DateTime, Duration, TimeZone, Utc};
use schedule_config::{Policy, load_config};
use schedule_core::{MemoryRecord, Role, StateKind};
use std::io::Write;

const CONFIG: &str = r#"
config_version = 1

# published forever once published
[[schedules]]
record = "forever_news_item"

[[schedules]]
record = "last_weeks_news_item"
end = "expired_at"

[[schedules]]
record = "admin"
start = "authorized_on"
end = "unauthorized_on"
end_required = true
"#;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 25, 14, 30, 0).unwrap()
}

fn load_test_policy() -> Policy {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    load_config(file.path()).unwrap()
}

#[test]
fn test_policy_loading() {
    let policy = load_test_policy();
    assert_eq!(policy.schedules.len(), 3);
    assert_eq!(
        policy.get("forever_news_item").unwrap().start_field().as_str(),
        "published_at"
    );
    assert!(policy.get("admin").unwrap().end_required());
}

#[test]
fn test_news_item_lifecycle() {
    let policy = load_test_policy();
    let config = policy.get("last_weeks_news_item").unwrap();
    let mut item = MemoryRecord::new();

    item.set("published_at", Some(now() + Duration::minutes(10)));
    assert_eq!(config.state("scheduled", &item, now()), Some(true));
    assert_eq!(config.state("published", &item, now()), Some(false));

    item.set("published_at", Some(now() - Duration::minutes(10)));
    item.set("expired_at", Some(now() + Duration::minutes(5)));
    assert!(config.is_started(&item, now()));
    assert!(config.is_scheduled(&item, Role::End, now()));
    assert!(item.valid(config));

    // the same record, read later, has expired
    let later = now() + Duration::minutes(6);
    assert!(!config.is_started(&item, later));
    assert!(config.is_ended(&item, later));
}

#[test]
fn test_admin_validation_scenarios() {
    let policy = load_test_policy();
    let config = policy.get("admin").unwrap();

    assert!(MemoryRecord::new().valid(config));

    let mut admin = MemoryRecord::new().with("authorized_on", now());
    assert!(!admin.valid(config));
    assert!(admin.errors().contains("unauthorized_on"));

    let mut admin = MemoryRecord::new()
        .with("authorized_on", now() + Duration::days(1))
        .with("unauthorized_on", now() - Duration::days(1));
    assert!(!admin.valid(config));
    assert!(admin.errors().on("unauthorized_on")[0].contains("later than"));

    let mut admin = MemoryRecord::new().with("unauthorized_on", now() + Duration::days(1));
    assert!(!admin.valid(config));
    assert!(admin.errors().on("unauthorized_on")[0].contains("not allowed without"));
}

#[test]
fn test_news_item_without_end_is_valid() {
    let policy = load_test_policy();
    let config = policy.get("last_weeks_news_item").unwrap();
    let mut item = MemoryRecord::new().with("published_at", now());
    assert!(item.valid(config));
}

#[test]
fn test_filters_select_matching_records() {
    let policy = load_test_policy();
    let config = policy.get("last_weeks_news_item").unwrap();

    let upcoming = MemoryRecord::new().with("published_at", now() + Duration::hours(1));
    let live = MemoryRecord::new()
        .with("published_at", now() - Duration::hours(1))
        .with("expired_at", now() + Duration::hours(1));
    let expired = MemoryRecord::new()
        .with("published_at", now() - Duration::hours(2))
        .with("expired_at", now() - Duration::hours(1));
    let records = [&upcoming, &live, &expired];

    let selected = |kind: StateKind| -> Vec<usize> {
        let filter = config.filter(kind).unwrap();
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.predicate.matches(**r, now()))
            .map(|(i, _)| i)
            .collect()
    };

    assert_eq!(selected(StateKind::Scheduled), vec![0]);
    assert_eq!(selected(StateKind::Started), vec![1]);
    assert_eq!(selected(StateKind::Ended), vec![2]);
}

#[test]
fn test_config_is_shared_across_threads() {
    let policy = load_test_policy();
    let config = policy.get("admin").unwrap().clone();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = config.clone();
            std::thread::spawn(move || {
                let record = MemoryRecord::new()
                    .with("authorized_on", now() - Duration::days(i + 1));
                config.is_started(&record, now())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
