//! Report types for the two registries the pipeline cross-matches.
//!
//! A missing-person report is filed by a relative; an unidentified-person
//! report is filed by a rescue or medical team. Both are created exactly once
//! by intake. `status` and `matched_with` are only ever changed by operator
//! workflows outside the matching pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Reported or observed gender. `Unknown` is only meaningful for
/// unidentified persons.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum Gender {
  #[serde(alias = "male")]
  Male,
  #[serde(alias = "female")]
  Female,
  #[serde(alias = "other")]
  Other,
  #[default]
  #[serde(alias = "unknown")]
  Unknown,
}

impl Gender {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
      Self::Other => "Other",
      Self::Unknown => "Unknown",
    }
  }
}

/// Why the missing person became separated from their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfSeparation {
  NaturalDisaster,
  Accident,
  #[serde(alias = "conflict/violence")]
  ConflictViolence,
  LostWhileEvacuating,
  Other,
}

/// Condition of an unidentified person when recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
  AliveInjured,
  AliveUnconscious,
  Deceased,
  Other,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MissingStatus {
  #[default]
  Missing,
  Matched,
  Found,
  Closed,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UnidentifiedStatus {
  #[default]
  Unidentified,
  Matched,
  Claimed,
  Closed,
}

// ─── Shared sub-types ────────────────────────────────────────────────────────

/// Observable physical attributes; every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalDescription {
  /// Centimetres.
  pub height:               Option<f64>,
  /// Kilograms.
  pub weight:               Option<f64>,
  pub eye_color:            Option<String>,
  pub hair_color:           Option<String>,
  /// Tattoos, scars, birthmarks.
  pub distinguishing_marks: Option<String>,
}

/// The relative who filed a missing-person report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
  pub name:     String,
  pub phone:    String,
  pub relation: Option<String>,
  pub email:    Option<String>,
  pub address:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryDetails {
  /// Rescue team or organisation.
  pub recovered_by: Option<String>,
  pub contact:      Option<String>,
  /// Official case or reference number.
  pub reference_id: Option<String>,
}

/// Where an unidentified person is currently being held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDetails {
  pub hospital:     Option<String>,
  pub morgue:       Option<String>,
  pub ward_or_unit: Option<String>,
}

// ─── Missing person ──────────────────────────────────────────────────────────

/// Validated input for [`crate::store::ReportStore::create_missing`].
/// `id`, `status` and timestamps are always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMissingPerson {
  pub full_name:            String,
  pub age:                  u32,
  pub gender:               Gender,
  pub physical_description: Option<PhysicalDescription>,
  pub last_seen_location:   String,
  pub last_seen_date:       DateTime<Utc>,
  pub clothing_description: Option<String>,
  pub cause_of_separation:  CauseOfSeparation,
  pub photo:                String,
  pub contact_info:         ContactInfo,
  pub additional_notes:     Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPersonReport {
  pub id:                   Uuid,
  pub full_name:            String,
  pub age:                  u32,
  pub gender:               Gender,
  pub physical_description: Option<PhysicalDescription>,
  pub last_seen_location:   String,
  pub last_seen_date:       DateTime<Utc>,
  pub clothing_description: Option<String>,
  pub cause_of_separation:  CauseOfSeparation,
  pub photo:                String,
  pub contact_info:         ContactInfo,
  pub additional_notes:     Option<String>,
  pub status:               MissingStatus,
  /// Advisory back-reference to an unidentified-person report.
  pub matched_with:         Option<Uuid>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl MissingPersonReport {
  /// Build a freshly-created report from validated input.
  pub fn from_new(id: Uuid, at: DateTime<Utc>, input: NewMissingPerson) -> Self {
    Self {
      id,
      full_name: input.full_name,
      age: input.age,
      gender: input.gender,
      physical_description: input.physical_description,
      last_seen_location: input.last_seen_location,
      last_seen_date: input.last_seen_date,
      clothing_description: input.clothing_description,
      cause_of_separation: input.cause_of_separation,
      photo: input.photo,
      contact_info: input.contact_info,
      additional_notes: input.additional_notes,
      status: MissingStatus::default(),
      matched_with: None,
      created_at: at,
      updated_at: at,
    }
  }

  /// JSON profile sent to the match scorer.
  pub fn profile(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }
}

// ─── Unidentified person ─────────────────────────────────────────────────────

/// Validated input for [`crate::store::ReportStore::create_unidentified`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnidentifiedPerson {
  pub found_at_location:    String,
  pub found_date:           DateTime<Utc>,
  pub condition:            Condition,
  pub estimated_age:        Option<u32>,
  pub gender:               Gender,
  pub physical_description: Option<PhysicalDescription>,
  pub clothing_description: Option<String>,
  pub belongings:           Vec<String>,
  pub photo:                String,
  pub recovery_details:     Option<RecoveryDetails>,
  pub storage_details:      Option<StorageDetails>,
  pub additional_notes:     Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnidentifiedPersonReport {
  pub id:                   Uuid,
  pub found_at_location:    String,
  pub found_date:           DateTime<Utc>,
  pub condition:            Condition,
  pub estimated_age:        Option<u32>,
  pub gender:               Gender,
  pub physical_description: Option<PhysicalDescription>,
  pub clothing_description: Option<String>,
  pub belongings:           Vec<String>,
  pub photo:                String,
  pub recovery_details:     Option<RecoveryDetails>,
  pub storage_details:      Option<StorageDetails>,
  pub status:               UnidentifiedStatus,
  /// Advisory back-reference to a missing-person report.
  pub matched_with:         Option<Uuid>,
  pub additional_notes:     Option<String>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}

impl UnidentifiedPersonReport {
  pub fn from_new(
    id: Uuid,
    at: DateTime<Utc>,
    input: NewUnidentifiedPerson,
  ) -> Self {
    Self {
      id,
      found_at_location: input.found_at_location,
      found_date: input.found_date,
      condition: input.condition,
      estimated_age: input.estimated_age,
      gender: input.gender,
      physical_description: input.physical_description,
      clothing_description: input.clothing_description,
      belongings: input.belongings,
      photo: input.photo,
      recovery_details: input.recovery_details,
      storage_details: input.storage_details,
      status: UnidentifiedStatus::default(),
      matched_with: None,
      additional_notes: input.additional_notes,
      created_at: at,
      updated_at: at,
    }
  }

  pub fn profile(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self)?)
  }
}
