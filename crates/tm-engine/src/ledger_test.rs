//! Tests for the ledger table and summary grouping.

use super::*;
use tm_db::DuckDbBackend;

// ── Helpers ────────────────────────────────────────────────────────────

fn stage(name: &str) -> StageName {
    StageName::parse(name).unwrap()
}

fn entry(name: &str, stage: &str) -> LedgerEntry {
    LedgerEntry {
        name: name.to_string(),
        stage: stage.to_string(),
        applied_at: NaiveDateTime::parse_from_str("2024-01-01 00:00:00", TIMESTAMP_FORMAT)
            .unwrap(),
    }
}

/// Insert a row with an explicit timestamp so ordering is deterministic.
fn insert_at(db: &DuckDbBackend, name: &str, stage: &str, at: &str) {
    db.execute(
        "INSERT INTO migrations (name, stage, created_at) VALUES (?, ?, CAST(? AS TIMESTAMP))",
        &[name, stage, at],
    )
    .unwrap();
}

// ── Schema ─────────────────────────────────────────────────────────────

#[test]
fn test_ensure_schema_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    assert!(!ledger.exists().unwrap());

    ledger.ensure_schema().unwrap();
    ledger.ensure_schema().unwrap();
    assert!(ledger.exists().unwrap());
    assert!(ledger.summary().unwrap().is_empty());
}

#[test]
fn test_custom_table_name() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "schema_ledger").unwrap();
    ledger.ensure_schema().unwrap();
    assert!(db.relation_exists("schema_ledger").unwrap());
    assert!(!db.relation_exists("migrations").unwrap());
}

#[test]
fn test_invalid_table_name_rejected() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = Ledger::new(&db, "x; DROP TABLE y").err().unwrap();
    assert!(matches!(err, EngineError::InvalidTable { .. }));
}

#[test]
fn test_summary_without_table_is_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    let err = ledger.summary().unwrap_err();
    assert!(matches!(err, EngineError::LedgerQuery { .. }));
}

// ── Rows ───────────────────────────────────────────────────────────────

#[test]
fn test_insert_and_delete_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    ledger.ensure_schema().unwrap();

    ledger.insert("create-users", &stage("up")).unwrap();
    ledger.insert("create-users", &stage("seed")).unwrap();
    assert_eq!(ledger.summary().unwrap().len(), 2);

    ledger.delete("create-users", &stage("seed")).unwrap();
    let summary = ledger.summary().unwrap();
    assert_eq!(summary.names(), vec!["create-users"]);
    assert_eq!(summary.entries()[0].stage, "up");
}

#[test]
fn test_duplicate_pair_rejected() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    ledger.ensure_schema().unwrap();

    ledger.insert("create-users", &stage("up")).unwrap();
    assert!(ledger.insert("create-users", &stage("up")).is_err());
}

#[test]
fn test_summary_ordered_by_time_then_insertion() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    ledger.ensure_schema().unwrap();

    insert_at(&db, "later", "up", "2024-03-01 10:00:00");
    insert_at(&db, "b-same-time", "up", "2024-01-01 10:00:00.5");
    insert_at(&db, "a-same-time", "up", "2024-01-01 10:00:00.5");

    let summary = ledger.summary().unwrap();
    assert_eq!(summary.names(), vec!["b-same-time", "a-same-time", "later"]);
    assert_eq!(
        summary.entries()[2].applied_at,
        NaiveDateTime::parse_from_str("2024-03-01 10:00:00", TIMESTAMP_FORMAT).unwrap()
    );
}

#[test]
fn test_stage_summary_filters_by_stage() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    ledger.ensure_schema().unwrap();

    insert_at(&db, "users", "up", "2024-01-01 00:00:00");
    insert_at(&db, "users", "seed", "2024-01-02 00:00:00");
    insert_at(&db, "posts", "up", "2024-01-03 00:00:00");

    let up = ledger.stage_summary(&stage("up")).unwrap();
    assert_eq!(up.names(), vec!["users", "posts"]);
    let seed = ledger.stage_summary(&stage("SEED")).unwrap();
    assert_eq!(seed.names(), vec!["users"]);
    assert!(ledger.stage_summary(&stage("script")).unwrap().is_empty());
}

#[test]
fn test_server_assigned_timestamp_parses() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(&db, "migrations").unwrap();
    ledger.ensure_schema().unwrap();

    ledger.insert("now", &stage("up")).unwrap();
    let summary = ledger.summary().unwrap();
    assert_eq!(summary.len(), 1);
    assert!(summary.entries()[0].applied_at.and_utc().timestamp() > 0);
}

// ── Summary grouping ───────────────────────────────────────────────────

#[test]
fn test_group_by_stage_keeps_first_appearance_order() {
    let summary = Summary::new(vec![
        entry("users", "up"),
        entry("users", "seed"),
        entry("posts", "up"),
    ]);

    let groups = summary.group_by_stage();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "up");
    assert_eq!(
        groups[0].1.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["users", "posts"]
    );
    assert_eq!(groups[1].0, "seed");
    assert_eq!(groups[1].1.len(), 1);
}

#[test]
fn test_group_by_file_keeps_first_appearance_order() {
    let summary = Summary::new(vec![
        entry("users", "up"),
        entry("posts", "up"),
        entry("users", "seed"),
    ]);

    let groups = summary.group_by_file();
    let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["users", "posts"]);
    assert_eq!(
        groups[0].1.iter().map(|e| e.stage.as_str()).collect::<Vec<_>>(),
        vec!["up", "seed"]
    );
}

#[test]
fn test_empty_summary_groups() {
    let summary = Summary::default();
    assert!(summary.is_empty());
    assert!(summary.group_by_stage().is_empty());
    assert!(summary.names().is_empty());
}
