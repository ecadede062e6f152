#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_has_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_file_database_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    {
        let db = Database::open(&path).unwrap();
        db.set_value("k", "v").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v"));
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

// ── Key-value access ──────────────────────────────────────────

#[test]
fn test_get_missing_key() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_value("nope").unwrap().is_none());
}

#[test]
fn test_set_and_get() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("expense-tracker:v2", "{}").unwrap();
    assert_eq!(
        db.get_value("expense-tracker:v2").unwrap().as_deref(),
        Some("{}")
    );
}

#[test]
fn test_set_replaces_prior_value() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("k", "first").unwrap();
    db.set_value("k", "second").unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_delete_value() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("k", "v").unwrap();
    assert!(db.delete_value("k").unwrap());
    assert!(!db.delete_value("k").unwrap());
    assert!(db.get_value("k").unwrap().is_none());
}
