//! Training plans and their items.
//!
//! Ownership runs one way: a plan holds its student's id, an item holds its
//! plan's id. `staff_id` and `exercise_id` are lookups, resolved through the
//! store when needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Id, Result,
  fields::{optional, required},
};

/// A named, student-owned collection of prescribed exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
  pub id:         Id,
  /// Fixed at creation.
  pub student_id: Id,
  /// The staff member who assigned the plan, if any.
  pub staff_id:   Option<Id>,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// One exercise prescription within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
  pub id:           Id,
  pub plan_id:      Id,
  pub exercise_id:  Id,
  /// Free-form, e.g. `"3"` or `"3x12"`.
  pub sets:         String,
  pub reps:         Option<String>,
  pub rest_seconds: Option<u32>,
  pub notes:        Option<String>,
}

/// Input to [`crate::assembly::PlanAssembly::add_item`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
  pub exercise_id:  Id,
  pub sets:         String,
  #[serde(default)]
  pub reps:         Option<String>,
  #[serde(default)]
  pub rest_seconds: Option<u32>,
  #[serde(default)]
  pub notes:        Option<String>,
}

impl NewItem {
  pub fn new(exercise_id: Id, sets: impl Into<String>) -> Self {
    Self {
      exercise_id,
      sets: sets.into(),
      reps: None,
      rest_seconds: None,
      notes: None,
    }
  }

  pub fn normalized(self) -> Result<Self> {
    Ok(Self {
      exercise_id:  self.exercise_id,
      sets:         required(self.sets, "sets")?,
      reps:         optional(self.reps),
      rest_seconds: self.rest_seconds,
      notes:        optional(self.notes),
    })
  }
}

/// Validate a plan name.
pub(crate) fn plan_name(name: String) -> Result<String> { required(name, "plan name") }

// ─── Read model ──────────────────────────────────────────────────────────────

/// A plan item joined with the name of its exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLine {
  #[serde(flatten)]
  pub item:          PlanItem,
  pub exercise_name: String,
}

/// A plan together with its items in creation order, computed on read, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDetail {
  #[serde(flatten)]
  pub plan:  Plan,
  pub items: Vec<ItemLine>,
}

impl PlanDetail {
  pub fn item_count(&self) -> usize { self.items.len() }
}
