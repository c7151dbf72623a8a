//! Error type for `academia-store-sqlite`.

use academia_core::{EntityKind, Id};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {what}: {value:?}")]
  UnknownValue { what: &'static str, value: String },

  #[error("{kind} {id} not found")]
  NotFound { kind: EntityKind, id: Id },

  /// A `UNIQUE` column already holds the value.
  #[error("{column} is already in use")]
  Unique { table: String, column: String },

  #[error("{kind} {id} is still used by {count} plan item(s)")]
  Referenced { kind: EntityKind, id: Id, count: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
  /// Lift uniqueness failures out of the generic SQLite error.
  fn from(e: rusqlite::Error) -> Self {
    if let rusqlite::Error::SqliteFailure(code, Some(msg)) = &e
      && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
      && let Some(target) = msg.strip_prefix("UNIQUE constraint failed: ")
    {
      // Single-column constraints only: "<table>.<column>".
      let (table, column) = target.split_once('.').unwrap_or(("", target));
      return Error::Unique {
        table:  table.to_owned(),
        column: column.to_owned(),
      };
    }
    Error::Sqlite(e)
  }
}

impl From<Error> for academia_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound { kind, id } => academia_core::Error::NotFound { kind, id },
      Error::Unique { .. } => academia_core::Error::Validation(e.to_string()),
      Error::Referenced { .. } => academia_core::Error::Conflict(e.to_string()),
      other => academia_core::Error::Store(Box::new(other)),
    }
  }
}
