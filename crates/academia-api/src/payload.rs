//! Request bodies shared by the student and staff endpoints.

use academia_core::photo::NewPhoto;
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::Deserialize;

use crate::error::ApiError;

/// A photo inlined in a JSON body: `{"filename": "me.jpg", "data": "<base64>"}`.
#[derive(Debug, Deserialize)]
pub struct PhotoUpload {
  pub filename: String,
  pub data:     String,
}

impl PhotoUpload {
  pub fn decode(self) -> Result<NewPhoto, ApiError> {
    let data = B64
      .decode(self.data.trim())
      .map_err(|e| ApiError::BadRequest(format!("photo data is not valid base64: {e}")))?;
    if data.is_empty() {
      return Err(ApiError::BadRequest("photo data is empty".into()));
    }
    Ok(NewPhoto { filename: self.filename, data })
  }
}

/// Record fields plus an optional photo, as sent to `POST` and `PUT`.
#[derive(Debug, Deserialize)]
pub struct WithPhoto<F> {
  #[serde(flatten)]
  pub fields: F,
  #[serde(default)]
  pub photo:  Option<PhotoUpload>,
}

impl<F> WithPhoto<F> {
  pub fn into_parts(self) -> Result<(F, Option<NewPhoto>), ApiError> {
    let photo = self.photo.map(PhotoUpload::decode).transpose()?;
    Ok((self.fields, photo))
  }
}
