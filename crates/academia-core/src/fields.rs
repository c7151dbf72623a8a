//! Normalisation shared by the `*Fields` input types.

use crate::{Error, Result};

/// Trim a required text field, rejecting blank input.
pub(crate) fn required(value: String, field: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(trimmed.to_owned())
}

/// Trim an optional text field; blank collapses to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn required_trims_and_rejects_blank() {
    assert_eq!(required("  Ana ".into(), "name").unwrap(), "Ana");
    let err = required("   ".into(), "name").unwrap_err();
    assert!(matches!(err, Error::Validation(ref m) if m == "name is required"));
  }

  #[test]
  fn optional_collapses_blank() {
    assert_eq!(optional(Some(" ".into())), None);
    assert_eq!(optional(None), None);
    assert_eq!(optional(Some(" a@b.c ".into())).as_deref(), Some("a@b.c"));
  }
}
