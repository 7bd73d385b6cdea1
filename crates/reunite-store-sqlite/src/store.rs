//! [`SqliteStore`], the SQLite implementation of [`ReportStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use reunite_core::{
  report::{
    MissingPersonReport, NewMissingPerson, NewUnidentifiedPerson,
    UnidentifiedPersonReport,
  },
  store::{ReportFilter, ReportStore},
};

use crate::{
  Result,
  encode::{decode_record, encode_dt, encode_record, encode_uuid, fold_location},
  query::{self, Columns, MISSING, UNIDENTIFIED},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A report store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_json(&self, cols: &Columns, id: Uuid) -> Result<Option<String>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT record_json FROM {} WHERE report_id = ?1", cols.table);

    let json: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], |row| row.get(0))
            .optional()?,
        )
      })
      .await?;
    Ok(json)
  }

  async fn find_json(&self, cols: &Columns, filter: &ReportFilter) -> Result<Vec<String>> {
    let (sql, params) = query::select(cols, filter);

    let rows: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── ReportStore impl ────────────────────────────────────────────────────────

impl ReportStore for SqliteStore {
  type Error = crate::Error;

  // ── Missing persons ───────────────────────────────────────────────────────

  async fn create_missing(&self, input: NewMissingPerson) -> Result<MissingPersonReport> {
    let report = MissingPersonReport::from_new(Uuid::new_v4(), Utc::now(), input);

    let id_str       = encode_uuid(report.id);
    let location     = report.last_seen_location.clone();
    let folded       = fold_location(&location);
    let date_str     = encode_dt(report.last_seen_date);
    let age          = i64::from(report.age);
    let gender       = report.gender.as_str();
    let created_str  = encode_dt(report.created_at);
    let record_json  = encode_record(&report)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO missing_persons (
             report_id, last_seen_location, location_folded, last_seen_date,
             age, gender, created_at, record_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            location,
            folded,
            date_str,
            age,
            gender,
            created_str,
            record_json,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(report_id = %report.id, "stored missing-person report");
    Ok(report)
  }

  async fn get_missing(&self, id: Uuid) -> Result<Option<MissingPersonReport>> {
    self
      .get_json(&MISSING, id)
      .await?
      .map(|json| decode_record(MISSING.table, &json))
      .transpose()
  }

  async fn find_missing(&self, filter: &ReportFilter) -> Result<Vec<MissingPersonReport>> {
    self
      .find_json(&MISSING, filter)
      .await?
      .iter()
      .map(|json| decode_record(MISSING.table, json))
      .collect()
  }

  // ── Unidentified persons ──────────────────────────────────────────────────

  async fn create_unidentified(
    &self,
    input: NewUnidentifiedPerson,
  ) -> Result<UnidentifiedPersonReport> {
    let report = UnidentifiedPersonReport::from_new(Uuid::new_v4(), Utc::now(), input);

    let id_str      = encode_uuid(report.id);
    let location    = report.found_at_location.clone();
    let folded      = fold_location(&location);
    let date_str    = encode_dt(report.found_date);
    let age         = report.estimated_age.map(i64::from);
    let gender      = report.gender.as_str();
    let created_str = encode_dt(report.created_at);
    let record_json = encode_record(&report)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO unidentified_persons (
             report_id, found_at_location, location_folded, found_date,
             estimated_age, gender, created_at, record_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            location,
            folded,
            date_str,
            age,
            gender,
            created_str,
            record_json,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(report_id = %report.id, "stored unidentified-person report");
    Ok(report)
  }

  async fn get_unidentified(&self, id: Uuid) -> Result<Option<UnidentifiedPersonReport>> {
    self
      .get_json(&UNIDENTIFIED, id)
      .await?
      .map(|json| decode_record(UNIDENTIFIED.table, &json))
      .transpose()
  }

  async fn find_unidentified(
    &self,
    filter: &ReportFilter,
  ) -> Result<Vec<UnidentifiedPersonReport>> {
    self
      .find_json(&UNIDENTIFIED, filter)
      .await?
      .iter()
      .map(|json| decode_record(UNIDENTIFIED.table, json))
      .collect()
  }
}
