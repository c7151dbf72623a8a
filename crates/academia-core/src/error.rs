//! Error types for `academia-core`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Id;

/// The five kinds of entity held by a [`GymStore`](crate::store::GymStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Student,
  Staff,
  Exercise,
  Plan,
  PlanItem,
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Student => "student",
      Self::Staff => "staff member",
      Self::Exercise => "exercise",
      Self::Plan => "plan",
      Self::PlanItem => "plan item",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} {id} not found")]
  NotFound { kind: EntityKind, id: Id },

  /// A required field is missing or a uniqueness constraint would break.
  #[error("validation failed: {0}")]
  Validation(String),

  /// A delete would leave a dangling reference.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("photo storage failure: {0}")]
  StorageFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(kind: EntityKind, id: Id) -> Self { Self::NotFound { kind, id } }

  /// Convert a [`GymStore`](crate::store::GymStore) backend error, keeping
  /// its classification.
  pub fn from_store<E: Into<Error>>(e: E) -> Self { e.into() }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
