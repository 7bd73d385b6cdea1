//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, NaiveDate, Utc};
use reunite_core::{
  dates::{local_to_utc, month_window},
  report::{
    CauseOfSeparation, Condition, ContactInfo, Gender, MissingStatus,
    NewMissingPerson, NewUnidentifiedPerson, UnidentifiedStatus,
  },
  store::{LocationMatch, LocationMode, ReportFilter, ReportStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn local_day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
  let naive = NaiveDate::from_ymd_opt(y, m, d)
    .unwrap()
    .and_hms_opt(12, 0, 0)
    .unwrap();
  local_to_utc(naive).unwrap()
}

fn missing(name: &str, age: u32, gender: Gender, location: &str) -> NewMissingPerson {
  NewMissingPerson {
    full_name:            name.into(),
    age,
    gender,
    physical_description: None,
    last_seen_location:   location.into(),
    last_seen_date:       local_day(2024, 3, 10),
    clothing_description: None,
    cause_of_separation:  CauseOfSeparation::NaturalDisaster,
    photo:                "https://res.cloudinary.com/demo/image/upload/uploads/m.jpg".into(),
    contact_info:         ContactInfo {
      name:     "Relative".into(),
      phone:    "+15550100".into(),
      relation: Some("sibling".into()),
      email:    None,
      address:  None,
    },
    additional_notes:     None,
  }
}

fn unidentified(location: &str, found: DateTime<Utc>) -> NewUnidentifiedPerson {
  NewUnidentifiedPerson {
    found_at_location:    location.into(),
    found_date:           found,
    condition:            Condition::AliveInjured,
    estimated_age:        None,
    gender:               Gender::Unknown,
    physical_description: None,
    clothing_description: None,
    belongings:           vec!["wristwatch".into()],
    photo:                "https://res.cloudinary.com/demo/image/upload/uploads/u.jpg".into(),
    recovery_details:     None,
    storage_details:      None,
    additional_notes:     None,
  }
}

fn contains(text: &str) -> Option<LocationMatch> {
  Some(LocationMatch {
    text: text.into(),
    mode: LocationMode::Contains,
  })
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_missing() {
  let s = store().await;
  let created = s
    .create_missing(missing("Asha Rai", 34, Gender::Female, "Riverside Market"))
    .await
    .unwrap();
  assert_eq!(created.status, MissingStatus::Missing);
  assert!(created.matched_with.is_none());

  let fetched = s.get_missing(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, created.id);
  assert_eq!(fetched.full_name, "Asha Rai");
  assert_eq!(fetched.contact_info.relation.as_deref(), Some("sibling"));
  assert_eq!(fetched.last_seen_date, created.last_seen_date);
}

#[tokio::test]
async fn get_missing_unknown_returns_none() {
  let s = store().await;
  assert!(s.get_missing(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.get_unidentified(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_and_get_unidentified() {
  let s = store().await;
  let created = s
    .create_unidentified(unidentified("Central Shelter", local_day(2024, 3, 15)))
    .await
    .unwrap();
  assert_eq!(created.status, UnidentifiedStatus::Unidentified);

  let fetched = s.get_unidentified(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.belongings, vec!["wristwatch"]);
  assert_eq!(fetched.gender, Gender::Unknown);
}

// ─── Date window ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn month_window_is_inclusive_and_bounded() {
  let s = store().await;
  let window = month_window(local_day(2024, 3, 15)).unwrap();

  let first = s
    .create_unidentified(unidentified("Shelter A", window.start))
    .await
    .unwrap();
  let last = s
    .create_unidentified(unidentified("Shelter B", window.end))
    .await
    .unwrap();
  s.create_unidentified(unidentified("Shelter C", local_day(2024, 2, 29)))
    .await
    .unwrap();
  s.create_unidentified(unidentified("Shelter D", local_day(2024, 4, 1)))
    .await
    .unwrap();

  let found = s
    .find_unidentified(&ReportFilter {
      date: Some(window),
      ..Default::default()
    })
    .await
    .unwrap();

  let ids: Vec<Uuid> = found.iter().map(|r| r.id).collect();
  assert_eq!(found.len(), 2, "got {ids:?}");
  assert!(ids.contains(&first.id));
  assert!(ids.contains(&last.id));
}

// ─── Location ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn location_contains_is_case_insensitive() {
  let s = store().await;
  s.create_unidentified(unidentified("Downtown Shelter", local_day(2024, 3, 2)))
    .await
    .unwrap();
  s.create_unidentified(unidentified("Harbour Clinic", local_day(2024, 3, 2)))
    .await
    .unwrap();

  let found = s
    .find_unidentified(&ReportFilter {
      location: contains("shelter"),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].found_at_location, "Downtown Shelter");
}

#[tokio::test]
async fn location_matching_folds_non_ascii_case() {
  let s = store().await;
  s.create_unidentified(unidentified("ÉCOLE Centrale", local_day(2024, 3, 2)))
    .await
    .unwrap();

  let found = s
    .find_unidentified(&ReportFilter {
      location: contains("école"),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].found_at_location, "ÉCOLE Centrale");

  let exact = s
    .find_unidentified(&ReportFilter {
      location: Some(LocationMatch {
        text: " école centrale ".into(),
        mode: LocationMode::Exact,
      }),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(exact.len(), 1);
}

#[tokio::test]
async fn location_wildcards_are_literal() {
  let s = store().await;
  s.create_unidentified(unidentified("Camp 5", local_day(2024, 3, 2)))
    .await
    .unwrap();

  let found = s
    .find_unidentified(&ReportFilter {
      location: contains("Camp_"),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(found.is_empty());
}

#[tokio::test]
async fn exact_location_mode() {
  let s = store().await;
  s.create_unidentified(unidentified("Downtown Shelter", local_day(2024, 3, 2)))
    .await
    .unwrap();

  let filter = |text: &str| ReportFilter {
    location: Some(LocationMatch {
      text: text.into(),
      mode: LocationMode::Exact,
    }),
    ..Default::default()
  };
  assert!(s.find_unidentified(&filter("shelter")).await.unwrap().is_empty());
  assert_eq!(
    s.find_unidentified(&filter("downtown shelter")).await.unwrap().len(),
    1
  );
}

// ─── Attribute query ─────────────────────────────────────────────────────────

#[tokio::test]
async fn attribute_query_matches_gender_age_band_and_location() {
  let s = store().await;
  let hit = s
    .create_missing(missing("A", 30, Gender::Male, "Central Shelter, Block 2"))
    .await
    .unwrap();
  let edge = s
    .create_missing(missing("B", 25, Gender::Male, "central shelter"))
    .await
    .unwrap();
  s.create_missing(missing("C", 36, Gender::Male, "Central Shelter"))
    .await
    .unwrap();
  s.create_missing(missing("D", 30, Gender::Female, "Central Shelter"))
    .await
    .unwrap();
  s.create_missing(missing("E", 30, Gender::Male, "North Camp"))
    .await
    .unwrap();

  let found = s
    .find_missing(&ReportFilter {
      location: contains("Central Shelter"),
      gender: Some(Gender::Male),
      age: Some((25, 35)),
      ..Default::default()
    })
    .await
    .unwrap();

  let ids: Vec<Uuid> = found.iter().map(|r| r.id).collect();
  assert_eq!(ids.len(), 2);
  assert!(ids.contains(&hit.id));
  assert!(ids.contains(&edge.id));
}

#[tokio::test]
async fn records_without_estimated_age_never_match_age_filter() {
  let s = store().await;
  s.create_unidentified(unidentified("Shelter", local_day(2024, 3, 2)))
    .await
    .unwrap();

  let found = s
    .find_unidentified(&ReportFilter {
      age: Some((0, 200)),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(found.is_empty());
}

#[tokio::test]
async fn limit_bounds_result_size() {
  let s = store().await;
  for i in 0..5 {
    s.create_missing(missing(&format!("P{i}"), 40, Gender::Other, "Camp"))
      .await
      .unwrap();
  }
  let found = s
    .find_missing(&ReportFilter {
      limit: Some(3),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(found.len(), 3);
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_creates_do_not_interfere() {
  let s = store().await;
  let mut handles = Vec::new();
  for i in 0..8 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.create_missing(missing(&format!("P{i}"), 20 + i, Gender::Male, "Camp"))
        .await
        .unwrap()
        .id
    }));
  }
  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap());
  }

  for id in &ids {
    assert!(s.get_missing(*id).await.unwrap().is_some());
  }
  let all = s.find_missing(&ReportFilter::default()).await.unwrap();
  assert_eq!(all.len(), 8);
}
