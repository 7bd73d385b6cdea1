//! Report date parsing and calendar-month windows.
//!
//! Field reports arrive with dates in whatever shape the filing device
//! produced. Anything without an explicit offset is read in the server's
//! local time zone, and month windows are computed in that same calendar.

use chrono::{
  DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime,
  TimeZone, Utc,
};

use crate::{Error, Result};

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Parse a report date.
///
/// Accepts RFC 3339, a naive date-time, or a bare `YYYY-MM-DD` (local
/// midnight).
pub fn parse_report_date(raw: &str) -> Result<DateTime<Utc>> {
  let s = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  for fmt in NAIVE_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
      return local_to_utc(naive).ok_or_else(|| Error::InvalidDate(raw.to_owned()));
    }
  }
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return local_to_utc(date.and_time(NaiveTime::MIN))
      .ok_or_else(|| Error::InvalidDate(raw.to_owned()));
  }
  Err(Error::InvalidDate(raw.to_owned()))
}

/// Interpret a wall-clock time in the server's zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times in
/// a DST gap are pushed forward by an hour.
pub fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
  Local
    .from_local_datetime(&naive)
    .earliest()
    .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
    .map(|dt| dt.with_timezone(&Utc))
}

/// An inclusive instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

impl DateWindow {
  pub fn contains(&self, at: DateTime<Utc>) -> bool {
    self.start <= at && at <= self.end
  }
}

/// The calendar month containing `at`, from the first day at 00:00:00 to
/// the last millisecond of the last day, in local time.
pub fn month_window(at: DateTime<Utc>) -> Result<DateWindow> {
  let local = at.with_timezone(&Local).date_naive();
  let invalid = || Error::InvalidDate(at.to_rfc3339());

  let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)
    .ok_or_else(invalid)?;
  let next_first = if local.month() == 12 {
    NaiveDate::from_ymd_opt(local.year() + 1, 1, 1)
  } else {
    NaiveDate::from_ymd_opt(local.year(), local.month() + 1, 1)
  }
  .ok_or_else(invalid)?;
  let last = next_first.pred_opt().ok_or_else(invalid)?;

  let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    .ok_or_else(invalid)?;

  Ok(DateWindow {
    start: local_to_utc(first.and_time(NaiveTime::MIN)).ok_or_else(invalid)?,
    end:   local_to_utc(last.and_time(end_of_day)).ok_or_else(invalid)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(h, min, s)
      .unwrap();
    local_to_utc(naive).unwrap()
  }

  #[test]
  fn bare_date_is_local_midnight() {
    let parsed = parse_report_date("2024-03-15").unwrap();
    assert_eq!(parsed, local(2024, 3, 15, 0, 0, 0));
  }

  #[test]
  fn rfc3339_keeps_its_offset() {
    let parsed = parse_report_date("2024-03-15T10:00:00+02:00").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2024-03-15T08:00:00+00:00");
  }

  #[test]
  fn naive_datetime_with_fraction() {
    let parsed = parse_report_date("2024-03-15T10:30:00.250").unwrap();
    assert_eq!(
      parsed,
      local(2024, 3, 15, 10, 30, 0) + Duration::milliseconds(250)
    );
  }

  #[test]
  fn garbage_is_rejected() {
    assert!(matches!(
      parse_report_date("last tuesday"),
      Err(Error::InvalidDate(_))
    ));
    assert!(parse_report_date("2024-02-30").is_err());
  }

  #[test]
  fn month_window_covers_first_through_last_day() {
    let w = month_window(local(2024, 3, 15, 12, 0, 0)).unwrap();
    assert!(w.contains(local(2024, 3, 1, 0, 0, 0)));
    assert!(w.contains(local(2024, 3, 31, 23, 59, 59)));
    assert!(!w.contains(local(2024, 2, 29, 23, 59, 59)));
    assert!(!w.contains(local(2024, 4, 1, 0, 0, 0)));
  }

  #[test]
  fn december_window_rolls_into_next_year() {
    let w = month_window(local(2023, 12, 31, 23, 0, 0)).unwrap();
    assert_eq!(w.start, local(2023, 12, 1, 0, 0, 0));
    assert!(w.contains(local(2023, 12, 31, 23, 59, 59)));
    assert!(!w.contains(local(2024, 1, 1, 0, 0, 0)));
  }
}
