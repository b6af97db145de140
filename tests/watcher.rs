use cert_expiry_watch::clock::FixedClock;
use cert_expiry_watch::models::{ContextId, ObservationEvent, ThresholdSource};
use cert_expiry_watch::notify::NotificationSink;
use cert_expiry_watch::policy::{PolicyStore, ThresholdResolver};
use cert_expiry_watch::runner::{ExpiryWatcher, Outcome};
use cert_expiry_watch::store::{FileStore, MemoryStore};
use chrono::{DateTime, Duration, TimeZone, Utc};

#[derive(Default)]
struct Badges(Vec<(ContextId, usize)>);

impl NotificationSink for Badges {
    fn set_badge(&mut self, context: ContextId, count: usize) {
        self.0.push((context, count));
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
}

fn ms(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

fn response_line(url: &str, context: i64, seen: DateTime<Utc>, certs: &[(&str, i64)]) -> String {
    let chain: Vec<String> = certs
        .iter()
        .map(|(fp, days_left)| {
            format!(
                r#"{{"fingerprint":"{}","issuer":"CN=Test CA","subject":"CN={}","validity_start":{},"validity_end":{}}}"#,
                fp,
                fp,
                ms(now() - Duration::days(80)),
                ms(now() + Duration::days(*days_left))
            )
        })
        .collect();
    format!(
        r#"{{"event":"response","url":"{}","context_id":{},"timestamp":{},"certificate_chain":[{}]}}"#,
        url,
        context,
        ms(seen),
        chain.join(",")
    )
}

fn event(line: &str) -> ObservationEvent {
    ObservationEvent::from_json_line(line).unwrap()
}

#[test]
fn test_repeat_observation_keeps_count_and_updates_last_seen() {
    let mut badges = Badges::default();
    let mut watcher = ExpiryWatcher::new(
        PolicyStore::new(MemoryStore::new()),
        &mut badges,
        FixedClock(now()),
    );

    let later = now() + Duration::minutes(3);
    watcher
        .handle(event(&response_line("https://example.com/", 1, now(), &[("a", 0)])))
        .unwrap();
    let outcome = watcher
        .handle(event(&response_line("https://example.com/next", 1, later, &[("a", 0)])))
        .unwrap();
    assert!(matches!(outcome, Outcome::Flagged { count: 1, .. }));

    let records = watcher.contexts().records(ContextId(1));
    assert_eq!(records.len(), 1);
    assert_eq!(records["a"].last_url, "https://example.com/next");
    assert_eq!(records["a"].last_seen, later);

    drop(watcher);
    assert_eq!(badges.0, vec![(ContextId(1), 1), (ContextId(1), 1)]);
}

#[test]
fn test_accumulation_isolation_and_reset() {
    let mut watcher = ExpiryWatcher::new(
        PolicyStore::new(MemoryStore::new()),
        Badges::default(),
        FixedClock(now()),
    );

    watcher
        .handle(event(&response_line("https://a.test/", 1, now(), &[("a", 0)])))
        .unwrap();
    watcher
        .handle(event(&response_line("https://b.test/", 1, now(), &[("b", 0)])))
        .unwrap();
    watcher
        .handle(event(&response_line("https://c.test/", 2, now(), &[("c", 0)])))
        .unwrap();

    let ctx1 = watcher.contexts().records(ContextId(1));
    assert_eq!(ctx1.len(), 2);
    assert!(ctx1.contains_key("a") && ctx1.contains_key("b"));
    assert!(!watcher.contexts().records(ContextId(2)).contains_key("a"));

    watcher
        .handle(event(r#"{"event":"reset","context_id":1}"#))
        .unwrap();
    assert!(watcher.contexts().records(ContextId(1)).is_empty());
    assert_eq!(watcher.contexts().count(ContextId(2)), 1);

    let outcome = watcher
        .handle(event(&response_line("https://a.test/", 1, now(), &[("b", 0)])))
        .unwrap();
    assert!(matches!(outcome, Outcome::Flagged { count: 1, .. }));
    assert_eq!(
        watcher.sink().0.last().copied(),
        Some((ContextId(1), 1))
    );
}

#[test]
fn test_policy_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");

    {
        let mut policy = PolicyStore::new(FileStore::new(&path));
        policy.set_global_default(30).unwrap();
        policy.set_override("example.com", 5).unwrap();
        assert!(policy.set_override("example.com", "abc").is_err());
    }

    let policy = PolicyStore::new(FileStore::new(&path));
    let resolver = ThresholdResolver::new(&policy);
    assert_eq!(resolver.resolve("example.com").threshold.days(), 5);
    assert_eq!(resolver.resolve("www.example.com").threshold.days(), 30);
    assert_eq!(
        resolver.resolve("www.example.com").source,
        ThresholdSource::GlobalDefault
    );
}

#[test]
fn test_file_backed_watcher_uses_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let mut policy = PolicyStore::new(FileStore::new(dir.path().join("policy.json")));
    policy.set_global_default(30).unwrap();
    policy.set_override("quiet.test", 2).unwrap();

    let mut watcher = ExpiryWatcher::new(policy, Badges::default(), FixedClock(now()));

    let loud = watcher
        .handle(event(&response_line("https://loud.test/", 4, now(), &[("x", 10)])))
        .unwrap();
    assert!(matches!(loud, Outcome::Flagged { .. }));

    let quiet = watcher
        .handle(event(&response_line("https://quiet.test/", 4, now(), &[("y", 10)])))
        .unwrap();
    assert!(matches!(quiet, Outcome::Clear { .. }));

    watcher.policy_mut().delete_override("quiet.test").unwrap();
    let quiet_again = watcher
        .handle(event(&response_line("https://quiet.test/", 4, now(), &[("y", 10)])))
        .unwrap();
    assert!(matches!(quiet_again, Outcome::Flagged { count: 2, .. }));
}

#[test]
fn test_corrupt_store_does_not_stall_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut watcher = ExpiryWatcher::new(
        PolicyStore::new(FileStore::new(&path)),
        Badges::default(),
        FixedClock(now()),
    );

    // Fallback of one day still applies
    let expiring = watcher
        .handle(event(&response_line("https://example.com/", 1, now(), &[("a", 0)])))
        .unwrap();
    match expiring {
        Outcome::Flagged { resolution, .. } => {
            assert_eq!(resolution.source, ThresholdSource::Fallback);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let fine = watcher
        .handle(event(&response_line("https://example.com/", 1, now(), &[("b", 5)])))
        .unwrap();
    assert!(matches!(fine, Outcome::Clear { .. }));

    assert!(watcher.policy_mut().set_global_default(3).is_err());
}
