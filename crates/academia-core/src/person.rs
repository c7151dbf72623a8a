//! Students and staff: the two kinds of people on the roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Id, Result,
  fields::{optional, required},
  photo::PhotoRef,
};

// ─── Shared ──────────────────────────────────────────────────────────────────

/// A postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
  pub street:      Option<String>,
  pub city:        Option<String>,
  /// State or province.
  pub state:       Option<String>,
  pub postal_code: Option<String>,
}

impl Address {
  fn normalized(self) -> Self {
    Self {
      street:      optional(self.street),
      city:        optional(self.city),
      state:       optional(self.state),
      postal_code: optional(self.postal_code),
    }
  }
}

// ─── Student ─────────────────────────────────────────────────────────────────

/// Enrollment status of a student.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
  #[default]
  Active,
  Inactive,
}

/// A gym member enrolled for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub id:          Id,
  pub name:        String,
  pub photo:       PhotoRef,
  /// Unique across all students.
  pub national_id: String,
  pub birth_date:  NaiveDate,
  pub address:     Address,
  pub phone:       Option<String>,
  /// Unique across all students when present.
  pub email:       Option<String>,
  pub enrolled_on: NaiveDate,
  pub status:      StudentStatus,
}

/// Everything about a student a caller supplies. Used both to register and to
/// replace a record; the photo travels separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentFields {
  pub name:        String,
  pub national_id: String,
  pub birth_date:  NaiveDate,
  #[serde(default)]
  pub address:     Address,
  #[serde(default)]
  pub phone:       Option<String>,
  #[serde(default)]
  pub email:       Option<String>,
  /// Defaults to today on registration; left out of an update, the stored
  /// date is kept.
  #[serde(default)]
  pub enrolled_on: Option<NaiveDate>,
  #[serde(default)]
  pub status:      StudentStatus,
}

impl StudentFields {
  /// Convenience constructor with every optional field left empty.
  pub fn new(
    name: impl Into<String>,
    national_id: impl Into<String>,
    birth_date: NaiveDate,
  ) -> Self {
    Self {
      name: name.into(),
      national_id: national_id.into(),
      birth_date,
      address: Address::default(),
      phone: None,
      email: None,
      enrolled_on: None,
      status: StudentStatus::default(),
    }
  }

  /// Trim text, collapse blanks to `None` and reject missing required fields.
  pub fn normalized(self) -> Result<Self> {
    Ok(Self {
      name:        required(self.name, "name")?,
      national_id: required(self.national_id, "national_id")?,
      birth_date:  self.birth_date,
      address:     self.address.normalized(),
      phone:       optional(self.phone),
      email:       optional(self.email),
      enrolled_on: self.enrolled_on,
      status:      self.status,
    })
  }
}

// ─── Staff ───────────────────────────────────────────────────────────────────

/// An employee, optionally a credentialed trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
  pub id:            Id,
  pub name:          String,
  pub photo:         PhotoRef,
  pub role:          String,
  /// Professional credential (e.g. a trainer's registry number). Unique when
  /// present.
  pub credential_id: Option<String>,
  pub address:       Address,
  pub phone:         Option<String>,
  /// Unique across all staff when present.
  pub email:         Option<String>,
  pub admitted_on:   Option<NaiveDate>,
}

/// Caller-supplied staff record; see [`StudentFields`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffFields {
  pub name:          String,
  pub role:          String,
  #[serde(default)]
  pub credential_id: Option<String>,
  #[serde(default)]
  pub address:       Address,
  #[serde(default)]
  pub phone:         Option<String>,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub admitted_on:   Option<NaiveDate>,
}

impl StaffFields {
  pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      role: role.into(),
      credential_id: None,
      address: Address::default(),
      phone: None,
      email: None,
      admitted_on: None,
    }
  }

  pub fn normalized(self) -> Result<Self> {
    Ok(Self {
      name:          required(self.name, "name")?,
      role:          required(self.role, "role")?,
      credential_id: optional(self.credential_id),
      address:       self.address.normalized(),
      phone:         optional(self.phone),
      email:         optional(self.email),
      admitted_on:   self.admitted_on,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn student_normalization_trims_and_blanks() {
    let mut fields = StudentFields::new(" Ana ", "111", date(2000, 1, 1));
    fields.email = Some("  ".into());
    fields.address.city = Some(" Recife ".into());

    let n = fields.normalized().unwrap();
    assert_eq!(n.name, "Ana");
    assert_eq!(n.email, None);
    assert_eq!(n.address.city.as_deref(), Some("Recife"));
    // Left for the store: today on insert, unchanged on update.
    assert_eq!(n.enrolled_on, None);
    assert_eq!(n.status, StudentStatus::Active);
  }

  #[test]
  fn student_requires_national_id() {
    let err = StudentFields::new("Ana", " ", date(2000, 1, 1))
      .normalized()
      .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn staff_requires_role() {
    let err = StaffFields::new("Bruno", "").normalized().unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m.contains("role")));
  }

  #[test]
  fn student_fields_deserialize_with_defaults() {
    let fields: StudentFields = serde_json::from_str(
      r#"{"name":"Ana","national_id":"111","birth_date":"2000-01-01"}"#,
    )
    .unwrap();
    assert_eq!(fields.status, StudentStatus::Active);
    assert_eq!(fields.address, Address::default());
    assert!(fields.enrolled_on.is_none());
  }
}
