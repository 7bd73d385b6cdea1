//! SQL schema for the Reunite SQLite store.
//!
//! Executed once at connection startup. Each registry keeps the full report
//! as JSON in `record_json`; the remaining columns are the ones candidate
//! selection filters on.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS missing_persons (
    report_id          TEXT PRIMARY KEY,
    last_seen_location TEXT NOT NULL,
    location_folded    TEXT NOT NULL,   -- trimmed, Unicode-lowercased
    last_seen_date     TEXT NOT NULL,   -- RFC 3339 UTC, fixed millisecond width
    age                INTEGER NOT NULL,
    gender             TEXT NOT NULL,   -- 'Male' | 'Female' | 'Other'
    created_at         TEXT NOT NULL,
    record_json        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS unidentified_persons (
    report_id          TEXT PRIMARY KEY,
    found_at_location  TEXT NOT NULL,
    location_folded    TEXT NOT NULL,
    found_date         TEXT NOT NULL,
    estimated_age      INTEGER,         -- NULL when no estimate was given
    gender             TEXT NOT NULL,   -- includes 'Unknown'
    created_at         TEXT NOT NULL,
    record_json        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS missing_date_idx       ON missing_persons(last_seen_date);
CREATE INDEX IF NOT EXISTS missing_gender_idx     ON missing_persons(gender);
CREATE INDEX IF NOT EXISTS unidentified_date_idx  ON unidentified_persons(found_date);

PRAGMA user_version = 1;
";
