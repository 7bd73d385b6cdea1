//! Raw intake submissions and their validation.
//!
//! Submissions are deserialised leniently (every field optional) so that
//! validation can report all missing required fields at once rather than
//! failing on the first.

use serde::Deserialize;

use crate::{
  ValidationError,
  dates::parse_report_date,
  report::{
    CauseOfSeparation, Condition, ContactInfo, Gender, NewMissingPerson,
    NewUnidentifiedPerson, PhysicalDescription, RecoveryDetails, StorageDetails,
  },
};

/// Trim and drop blank strings.
fn present(s: &Option<String>) -> Option<String> {
  s.as_deref()
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_owned)
}

fn require_photo(photo: &Option<String>) -> Result<String, ValidationError> {
  present(photo).ok_or_else(|| ValidationError::new("Photo is required"))
}

// ─── Missing person ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
  pub name:     Option<String>,
  pub phone:    Option<String>,
  pub relation: Option<String>,
  pub email:    Option<String>,
  pub address:  Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPersonSubmission {
  pub full_name:            Option<String>,
  pub age:                  Option<u32>,
  pub gender:               Option<Gender>,
  pub physical_description: Option<PhysicalDescription>,
  pub last_seen_location:   Option<String>,
  pub last_seen_date:       Option<String>,
  pub clothing_description: Option<String>,
  pub cause_of_separation:  Option<CauseOfSeparation>,
  /// Reference to the uploaded photo (URL or provider URI).
  pub photo:                Option<String>,
  pub contact_info:         Option<ContactSubmission>,
  pub additional_notes:     Option<String>,
}

impl MissingPersonSubmission {
  pub fn validate(self) -> Result<NewMissingPerson, ValidationError> {
    let photo = require_photo(&self.photo)?;

    let full_name = present(&self.full_name);
    let location = present(&self.last_seen_location);
    let date_raw = present(&self.last_seen_date);
    let contact = self.contact_info.as_ref().and_then(|c| {
      Some(ContactInfo {
        name:     present(&c.name)?,
        phone:    present(&c.phone)?,
        relation: present(&c.relation),
        email:    present(&c.email),
        address:  present(&c.address),
      })
    });

    let mut missing = Vec::new();
    if full_name.is_none() {
      missing.push("fullName");
    }
    if self.age.is_none() {
      missing.push("age");
    }
    if self.gender.is_none() {
      missing.push("gender");
    }
    if location.is_none() {
      missing.push("lastSeenLocation");
    }
    if date_raw.is_none() {
      missing.push("lastSeenDate");
    }
    if self.cause_of_separation.is_none() {
      missing.push("causeOfSeparation");
    }
    if contact.is_none() {
      missing.push("contactInfo");
    }

    let (
      Some(full_name),
      Some(age),
      Some(gender),
      Some(last_seen_location),
      Some(date_raw),
      Some(cause_of_separation),
      Some(contact_info),
    ) = (
      full_name,
      self.age,
      self.gender,
      location,
      date_raw,
      self.cause_of_separation,
      contact,
    )
    else {
      return Err(ValidationError::missing(
        missing.into_iter().map(str::to_owned).collect(),
      ));
    };

    if gender == Gender::Unknown {
      return Err(ValidationError::new(
        "gender must be one of Male, Female, Other",
      ));
    }

    let last_seen_date = parse_report_date(&date_raw)
      .map_err(|_| ValidationError::new("Invalid lastSeenDate"))?;

    Ok(NewMissingPerson {
      full_name,
      age,
      gender,
      physical_description: self.physical_description,
      last_seen_location,
      last_seen_date,
      clothing_description: present(&self.clothing_description),
      cause_of_separation,
      photo,
      contact_info,
      additional_notes: present(&self.additional_notes),
    })
  }
}

// ─── Unidentified person ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnidentifiedPersonSubmission {
  pub found_at_location:    Option<String>,
  pub found_date:           Option<String>,
  pub condition:            Option<Condition>,
  pub estimated_age:        Option<u32>,
  pub gender:               Option<Gender>,
  pub physical_description: Option<PhysicalDescription>,
  pub clothing_description: Option<String>,
  #[serde(default)]
  pub belongings:           Vec<String>,
  pub photo:                Option<String>,
  pub recovery_details:     Option<RecoveryDetails>,
  pub storage_details:      Option<StorageDetails>,
  pub additional_notes:     Option<String>,
}

impl UnidentifiedPersonSubmission {
  pub fn validate(self) -> Result<NewUnidentifiedPerson, ValidationError> {
    let photo = require_photo(&self.photo)?;

    let location = present(&self.found_at_location);
    let date_raw = present(&self.found_date);

    let (Some(found_at_location), Some(date_raw), Some(condition)) =
      (location.clone(), date_raw.clone(), self.condition)
    else {
      let mut missing = Vec::new();
      if location.is_none() {
        missing.push("foundAtLocation".to_owned());
      }
      if date_raw.is_none() {
        missing.push("foundDate".to_owned());
      }
      if self.condition.is_none() {
        missing.push("condition".to_owned());
      }
      return Err(ValidationError::missing(missing));
    };

    let found_date = parse_report_date(&date_raw)
      .map_err(|_| ValidationError::new("Invalid foundDate"))?;

    Ok(NewUnidentifiedPerson {
      found_at_location,
      found_date,
      condition,
      estimated_age: self.estimated_age,
      gender: self.gender.unwrap_or_default(),
      physical_description: self.physical_description,
      clothing_description: present(&self.clothing_description),
      belongings: self
        .belongings
        .into_iter()
        .map(|b| b.trim().to_owned())
        .filter(|b| !b.is_empty())
        .collect(),
      photo,
      recovery_details: self.recovery_details,
      storage_details: self.storage_details,
      additional_notes: present(&self.additional_notes),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn missing_json() -> serde_json::Value {
    serde_json::json!({
      "fullName": "Asha Rai",
      "age": 34,
      "gender": "Female",
      "lastSeenLocation": "Riverside Market",
      "lastSeenDate": "2024-03-10",
      "causeOfSeparation": "natural_disaster",
      "photo": "https://res.cloudinary.com/demo/image/upload/uploads/a.jpg",
      "contactInfo": { "name": "Bikash Rai", "phone": "+9779800000000" }
    })
  }

  #[test]
  fn complete_missing_submission_validates() {
    let sub: MissingPersonSubmission =
      serde_json::from_value(missing_json()).unwrap();
    let new = sub.validate().unwrap();
    assert_eq!(new.full_name, "Asha Rai");
    assert_eq!(new.contact_info.phone, "+9779800000000");
    assert_eq!(new.gender, Gender::Female);
  }

  #[test]
  fn photo_is_checked_before_fields() {
    let sub = MissingPersonSubmission::default();
    let err = sub.validate().unwrap_err();
    assert_eq!(err.message, "Photo is required");
    assert!(err.missing_fields.is_empty());
  }

  #[test]
  fn all_missing_fields_are_reported() {
    let sub = MissingPersonSubmission {
      photo: Some("https://res.cloudinary.com/x.jpg".into()),
      full_name: Some("   ".into()),
      contact_info: Some(ContactSubmission {
        name: Some("Bikash".into()),
        ..Default::default()
      }),
      ..Default::default()
    };
    let err = sub.validate().unwrap_err();
    assert_eq!(
      err.missing_fields,
      vec![
        "fullName",
        "age",
        "gender",
        "lastSeenLocation",
        "lastSeenDate",
        "causeOfSeparation",
        "contactInfo",
      ]
    );
  }

  #[test]
  fn invalid_last_seen_date_is_a_validation_error() {
    let mut json = missing_json();
    json["lastSeenDate"] = "not a date".into();
    let sub: MissingPersonSubmission = serde_json::from_value(json).unwrap();
    let err = sub.validate().unwrap_err();
    assert_eq!(err.message, "Invalid lastSeenDate");
  }

  #[test]
  fn unknown_gender_rejected_for_missing_person() {
    let mut json = missing_json();
    json["gender"] = "Unknown".into();
    let sub: MissingPersonSubmission = serde_json::from_value(json).unwrap();
    assert!(sub.validate().is_err());
  }

  #[test]
  fn unidentified_defaults_gender_to_unknown() {
    let sub: UnidentifiedPersonSubmission = serde_json::from_value(
      serde_json::json!({
        "foundAtLocation": "Central Shelter",
        "foundDate": "2024-03-15",
        "condition": "alive_injured",
        "photo": "gs://field-team/x.jpg",
        "belongings": ["red backpack", " "]
      }),
    )
    .unwrap();
    let new = sub.validate().unwrap();
    assert_eq!(new.gender, Gender::Unknown);
    assert_eq!(new.belongings, vec!["red backpack"]);
    assert_eq!(new.photo, "gs://field-team/x.jpg");
  }

  #[test]
  fn unidentified_missing_fields() {
    let sub = UnidentifiedPersonSubmission {
      photo: Some("https://res.cloudinary.com/x.jpg".into()),
      found_date: Some("2024-03-15".into()),
      ..Default::default()
    };
    let err = sub.validate().unwrap_err();
    assert_eq!(err.missing_fields, vec!["foundAtLocation", "condition"]);
  }
}
