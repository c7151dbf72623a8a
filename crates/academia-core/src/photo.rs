//! Photo references and the `PhotoStore` trait.
//!
//! No binary data lives in the database. An entity only carries a
//! [`PhotoRef`], the name under which a [`PhotoStore`] saved the upload, or the
//! placeholder reference when nothing was uploaded.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

/// The name of a stored photo, or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
  /// Reference shown for entities without an uploaded photo. It never names a
  /// stored file and must never be deleted.
  pub const PLACEHOLDER: &'static str = "default.png";

  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn placeholder() -> Self { Self(Self::PLACEHOLDER.to_owned()) }

  pub fn is_placeholder(&self) -> bool { self.0 == Self::PLACEHOLDER }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for PhotoRef {
  fn default() -> Self { Self::placeholder() }
}

impl fmt::Display for PhotoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// An uploaded image waiting to be saved.
#[derive(Debug, Clone)]
pub struct NewPhoto {
  /// Client-side filename; only its extension is kept.
  pub filename: String,
  pub data:     Vec<u8>,
}

/// Abstraction over the blob storage that holds uploaded photos.
///
/// Writes and deletes are not transactional with the entity store. Callers
/// save before they reference, and delete only after the reference is gone.
pub trait PhotoStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `data` and return the reference it can be found under.
  fn save<'a>(
    &'a self,
    data: &'a [u8],
    suggested_name: &'a str,
  ) -> impl Future<Output = Result<PhotoRef, Self::Error>> + Send + 'a;

  /// Remove a stored photo. Deleting an absent reference is not an error.
  fn delete<'a>(
    &'a self,
    photo: &'a PhotoRef,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
