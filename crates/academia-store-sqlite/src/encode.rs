//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, timestamps as RFC 3339 strings, muscle
//! groups as a comma-joined list in canonical order.

use std::{collections::BTreeSet, str::FromStr};

use academia_core::{
  Id,
  exercise::{Exercise, MuscleGroup},
  person::{Address, Staff, Student, StudentStatus},
  photo::PhotoRef,
  plan::{Plan, PlanItem},
};
use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── StudentStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: StudentStatus) -> &'static str {
  match s {
    StudentStatus::Active => "active",
    StudentStatus::Inactive => "inactive",
  }
}

pub fn decode_status(s: &str) -> Result<StudentStatus> {
  match s {
    "active" => Ok(StudentStatus::Active),
    "inactive" => Ok(StudentStatus::Inactive),
    other => Err(Error::UnknownValue { what: "student status", value: other.to_owned() }),
  }
}

// ─── Muscle groups ───────────────────────────────────────────────────────────

/// Join in `BTreeSet` order, which is alphabetical by tag name.
pub fn encode_groups(groups: &BTreeSet<MuscleGroup>) -> String {
  groups
    .iter()
    .map(|&g| -> &'static str { g.into() })
    .collect::<Vec<_>>()
    .join(",")
}

pub fn decode_groups(s: &str) -> Result<BTreeSet<MuscleGroup>> {
  s.split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(|t| {
      MuscleGroup::from_str(t)
        .map_err(|_| Error::UnknownValue { what: "muscle group", value: t.to_owned() })
    })
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const STUDENT_COLUMNS: &str = "id, name, photo, national_id, birth_date, street, city, \
                                   state, postal_code, phone, email, enrolled_on, status";

/// Raw values read directly from a `students` row.
pub struct RawStudent {
  pub id:          Id,
  pub name:        String,
  pub photo:       String,
  pub national_id: String,
  pub birth_date:  String,
  pub address:     Address,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub enrolled_on: String,
  pub status:      String,
}

impl RawStudent {
  /// Map a row selected with [`STUDENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      photo:       row.get(2)?,
      national_id: row.get(3)?,
      birth_date:  row.get(4)?,
      address:     Address {
        street:      row.get(5)?,
        city:        row.get(6)?,
        state:       row.get(7)?,
        postal_code: row.get(8)?,
      },
      phone:       row.get(9)?,
      email:       row.get(10)?,
      enrolled_on: row.get(11)?,
      status:      row.get(12)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:          self.id,
      name:        self.name,
      photo:       PhotoRef::new(self.photo),
      national_id: self.national_id,
      birth_date:  decode_date(&self.birth_date)?,
      address:     self.address,
      phone:       self.phone,
      email:       self.email,
      enrolled_on: decode_date(&self.enrolled_on)?,
      status:      decode_status(&self.status)?,
    })
  }
}

pub const STAFF_COLUMNS: &str = "id, name, photo, role, credential_id, street, city, state, \
                                 postal_code, phone, email, admitted_on";

/// Raw values read directly from a `staff` row.
pub struct RawStaff {
  pub id:            Id,
  pub name:          String,
  pub photo:         String,
  pub role:          String,
  pub credential_id: Option<String>,
  pub address:       Address,
  pub phone:         Option<String>,
  pub email:         Option<String>,
  pub admitted_on:   Option<String>,
}

impl RawStaff {
  /// Map a row selected with [`STAFF_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      photo:         row.get(2)?,
      role:          row.get(3)?,
      credential_id: row.get(4)?,
      address:       Address {
        street:      row.get(5)?,
        city:        row.get(6)?,
        state:       row.get(7)?,
        postal_code: row.get(8)?,
      },
      phone:         row.get(9)?,
      email:         row.get(10)?,
      admitted_on:   row.get(11)?,
    })
  }

  pub fn into_staff(self) -> Result<Staff> {
    Ok(Staff {
      id:            self.id,
      name:          self.name,
      photo:         PhotoRef::new(self.photo),
      role:          self.role,
      credential_id: self.credential_id,
      address:       self.address,
      phone:         self.phone,
      email:         self.email,
      admitted_on:   self.admitted_on.as_deref().map(decode_date).transpose()?,
    })
  }
}

pub const EXERCISE_COLUMNS: &str = "id, name, muscle_groups, description";

pub struct RawExercise {
  pub id:            Id,
  pub name:          String,
  pub muscle_groups: String,
  pub description:   Option<String>,
}

impl RawExercise {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      muscle_groups: row.get(2)?,
      description:   row.get(3)?,
    })
  }

  pub fn into_exercise(self) -> Result<Exercise> {
    Ok(Exercise {
      id:            self.id,
      name:          self.name,
      muscle_groups: decode_groups(&self.muscle_groups)?,
      description:   self.description,
    })
  }
}

pub const PLAN_COLUMNS: &str = "id, student_id, staff_id, name, created_at";

pub struct RawPlan {
  pub id:         Id,
  pub student_id: Id,
  pub staff_id:   Option<Id>,
  pub name:       String,
  pub created_at: String,
}

impl RawPlan {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      student_id: row.get(1)?,
      staff_id:   row.get(2)?,
      name:       row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_plan(self) -> Result<Plan> {
    Ok(Plan {
      id:         self.id,
      student_id: self.student_id,
      staff_id:   self.staff_id,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const ITEM_COLUMNS: &str = "id, plan_id, exercise_id, sets, reps, rest_seconds, notes";

/// Map a row selected with [`ITEM_COLUMNS`]; every column decodes natively.
pub fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlanItem> {
  Ok(PlanItem {
    id:           row.get(0)?,
    plan_id:      row.get(1)?,
    exercise_id:  row.get(2)?,
    sets:         row.get(3)?,
    reps:         row.get(4)?,
    rest_seconds: row.get(5)?,
    notes:        row.get(6)?,
  })
}
