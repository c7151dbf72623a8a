//! Exercises and their muscle-group tags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  Error, Id, Result,
  fields::{optional, required},
};

/// A muscle-group tag.
///
/// Variants are declared in alphabetical order of their names, so the derived
/// `Ord` and the order of the stored text agree.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MuscleGroup {
  Abs,
  Back,
  Biceps,
  Calves,
  Cardio,
  Chest,
  Forearms,
  FullBody,
  Glutes,
  Legs,
  Shoulders,
  Triceps,
}

/// A named physical movement tagged by muscle group(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
  pub id:            Id,
  /// Unique across all exercises.
  pub name:          String,
  pub muscle_groups: BTreeSet<MuscleGroup>,
  pub description:   Option<String>,
}

impl Exercise {
  /// The first tag in canonical order; listings sort on it.
  pub fn primary_group(&self) -> Option<MuscleGroup> {
    self.muscle_groups.first().copied()
  }
}

/// Caller-supplied exercise record. Duplicate tags collapse on deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseFields {
  pub name:          String,
  pub muscle_groups: BTreeSet<MuscleGroup>,
  #[serde(default)]
  pub description:   Option<String>,
}

impl ExerciseFields {
  pub fn new(
    name: impl Into<String>,
    muscle_groups: impl IntoIterator<Item = MuscleGroup>,
  ) -> Self {
    Self {
      name:          name.into(),
      muscle_groups: muscle_groups.into_iter().collect(),
      description:   None,
    }
  }

  pub fn normalized(self) -> Result<Self> {
    if self.muscle_groups.is_empty() {
      return Err(Error::Validation("at least one muscle group is required".into()));
    }
    Ok(Self {
      name:          required(self.name, "name")?,
      muscle_groups: self.muscle_groups,
      description:   optional(self.description),
    })
  }
}
