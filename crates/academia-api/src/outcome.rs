//! Responses for mutations whose row change committed but whose photo cleanup
//! may have failed.

use academia_core::{Error, roster::Committed};
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;

/// `200` with the new record; a `"warning"` field is added when the old photo
/// could not be released.
pub fn updated<T: Serialize>(committed: Committed<T>) -> Response {
  let mut body = match serde_json::to_value(&committed.value) {
    Ok(v) => v,
    Err(e) => return ApiError::from(Error::Store(Box::new(e))).into_response(),
  };
  if let Some(failure) = committed.storage_failure
    && let Value::Object(map) = &mut body
  {
    map.insert("warning".into(), Value::String(failure.to_string()));
  }
  Json(body).into_response()
}

/// `204`, or `200` with `{"warning": ...}` when the photo release failed.
pub fn removed<T>(committed: Committed<T>) -> Response {
  match committed.storage_failure {
    None => StatusCode::NO_CONTENT.into_response(),
    Some(failure) => Json(json!({ "warning": failure.to_string() })).into_response(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Row {
    id: i64,
  }

  #[test]
  fn clean_remove_is_no_content() {
    let r = removed(Committed { value: (), storage_failure: None });
    assert_eq!(r.status(), StatusCode::NO_CONTENT);
  }

  #[test]
  fn failed_release_is_a_warning() {
    let r = removed(Committed {
      value:           (),
      storage_failure: Some(Error::StorageFailure("disk gone".into())),
    });
    assert_eq!(r.status(), StatusCode::OK);

    let r = updated(Committed {
      value:           Row { id: 1 },
      storage_failure: Some(Error::StorageFailure("disk gone".into())),
    });
    assert_eq!(r.status(), StatusCode::OK);
  }
}
