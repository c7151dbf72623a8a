//! Error types and axum `IntoResponse` implementation.

use std::{io::ErrorKind, path::PathBuf};

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("photo file {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("invalid photo name: {0:?}")]
  InvalidName(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::InvalidName(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
      Error::Io { ref source, .. } if source.kind() == ErrorKind::NotFound => {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
      }
      Error::Io { .. } => {
        tracing::error!(error = %self, "photo read failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "photo storage error").into_response()
      }
    }
  }
}
