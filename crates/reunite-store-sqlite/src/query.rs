//! Translation of a [`ReportFilter`] into a parameterised `SELECT`.

use reunite_core::store::{LocationMode, ReportFilter};
use rusqlite::types::Value;

use crate::encode::{encode_dt, fold_location};

/// Upper bound applied when a filter carries no limit of its own.
const DEFAULT_LIMIT: usize = 100;

/// Column names for one registry table. Both tables match locations on
/// `location_folded`.
pub struct Columns {
  pub table:    &'static str,
  pub date:     &'static str,
  pub age:      &'static str,
}

pub const MISSING: Columns = Columns {
  table:    "missing_persons",
  date:     "last_seen_date",
  age:      "age",
};

pub const UNIDENTIFIED: Columns = Columns {
  table:    "unidentified_persons",
  date:     "found_date",
  age:      "estimated_age",
};

/// Escape `LIKE` wildcards so the query text is matched literally.
fn escape_like(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(ch);
  }
  out
}

/// Push a parameter and return its 1-based position.
fn bind(params: &mut Vec<Value>, v: Value) -> usize {
  params.push(v);
  params.len()
}

/// Build the SQL text and its positional parameters.
pub fn select(cols: &Columns, filter: &ReportFilter) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  if let Some(loc) = &filter.location {
    let folded = fold_location(&loc.text);
    match loc.mode {
      LocationMode::Contains => {
        let n = bind(
          &mut params,
          Value::Text(format!("%{}%", escape_like(&folded))),
        );
        conds.push(format!("location_folded LIKE ?{n} ESCAPE '\\'"));
      }
      LocationMode::Exact => {
        let n = bind(&mut params, Value::Text(folded));
        conds.push(format!("location_folded = ?{n}"));
      }
    }
  }

  if let Some(gender) = filter.gender {
    let n = bind(&mut params, Value::Text(gender.as_str().to_owned()));
    conds.push(format!("gender = ?{n}"));
  }

  if let Some((lo, hi)) = filter.age {
    let a = bind(&mut params, Value::Integer(i64::from(lo)));
    let b = bind(&mut params, Value::Integer(i64::from(hi)));
    conds.push(format!("{} BETWEEN ?{a} AND ?{b}", cols.age));
  }

  if let Some(window) = filter.date {
    let a = bind(&mut params, Value::Text(encode_dt(window.start)));
    let b = bind(&mut params, Value::Text(encode_dt(window.end)));
    conds.push(format!("{} BETWEEN ?{a} AND ?{b}", cols.date));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };

  let limit = filter.limit.unwrap_or(DEFAULT_LIMIT) as i64;
  let n = bind(&mut params, Value::Integer(limit));

  let sql = format!(
    "SELECT record_json FROM {table}
     {where_clause}
     ORDER BY {date} DESC, created_at ASC
     LIMIT ?{n}",
    table = cols.table,
    date = cols.date,
  );

  (sql, params)
}
