//! [`DiskPhotoStore`]: uploaded photos as plain files in one directory.
//!
//! Every upload gets a fresh name (`<uuid>.<ext>`), so no two entities ever
//! share a file and releasing one photo cannot affect another.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use academia_core::photo::{PhotoRef, PhotoStore};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct DiskPhotoStore {
  dir: PathBuf,
}

impl DiskPhotoStore {
  /// Use `dir` for photo files, creating it if needed.
  pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, Error> {
    let dir = dir.into();
    tokio::fs::create_dir_all(&dir)
      .await
      .map_err(|source| Error::Io { path: dir.clone(), source })?;
    Ok(Self { dir })
  }

  /// Resolve a stored name to its file, refusing anything that could escape
  /// the photo directory.
  pub fn path_of(&self, name: &str) -> Result<PathBuf, Error> {
    let valid = !name.is_empty()
      && !name.starts_with('.')
      && name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
      return Err(Error::InvalidName(name.to_owned()));
    }
    Ok(self.dir.join(name))
  }

  /// Read a stored photo (or the placeholder, if one was put in the
  /// directory).
  pub async fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
    let path = self.path_of(name)?;
    tokio::fs::read(&path)
      .await
      .map_err(|source| Error::Io { path, source })
  }
}

/// The lower-cased extension of `suggested_name`, if it looks like one.
fn extension(suggested_name: &str) -> Option<String> {
  let ext = Path::new(suggested_name).extension()?.to_str()?;
  let ok = (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
  ok.then(|| ext.to_ascii_lowercase())
}

impl PhotoStore for DiskPhotoStore {
  type Error = Error;

  async fn save<'a>(&'a self, data: &'a [u8], suggested_name: &'a str) -> Result<PhotoRef, Error> {
    let id = Uuid::new_v4();
    let name = match extension(suggested_name) {
      Some(ext) => format!("{id}.{ext}"),
      None => id.to_string(),
    };
    let path = self.path_of(&name)?;

    // Write beside the target and rename, so a reader never sees half a file.
    let tmp = self.dir.join(format!(".{id}.part"));
    tokio::fs::write(&tmp, data)
      .await
      .map_err(|source| Error::Io { path: tmp.clone(), source })?;
    if let Err(source) = tokio::fs::rename(&tmp, &path).await {
      if let Err(e) = tokio::fs::remove_file(&tmp).await {
        warn!(path = ?tmp, error = %e, "failed to remove partial photo");
      }
      return Err(Error::Io { path, source });
    }

    debug!(photo = %name, bytes = data.len(), "photo written");
    Ok(PhotoRef::new(name))
  }

  async fn delete<'a>(&'a self, photo: &'a PhotoRef) -> Result<(), Error> {
    if photo.is_placeholder() {
      return Ok(());
    }
    let path = self.path_of(photo.as_str())?;
    match tokio::fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(source) => Err(Error::Io { path, source }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn photos() -> (tempfile::TempDir, DiskPhotoStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskPhotoStore::open(dir.path().join("photos")).await.unwrap();
    (dir, store)
  }

  #[test]
  fn extension_is_lowercased_and_checked() {
    assert_eq!(extension("Me.JPG").as_deref(), Some("jpg"));
    assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
    assert_eq!(extension("noext"), None);
    assert_eq!(extension("weird.p/ng"), None);
    assert_eq!(extension("long.extension"), None);
  }

  #[test]
  fn path_of_rejects_traversal() {
    let store = DiskPhotoStore { dir: PathBuf::from("/srv/photos") };
    assert!(store.path_of("ab12.png").is_ok());
    assert!(matches!(store.path_of("../etc/passwd"), Err(Error::InvalidName(_))));
    assert!(matches!(store.path_of(".hidden"), Err(Error::InvalidName(_))));
    assert!(matches!(store.path_of(""), Err(Error::InvalidName(_))));
  }

  #[tokio::test]
  async fn save_read_delete() {
    let (_dir, store) = photos().await;

    let photo = store.save(b"png bytes", "me.PNG").await.unwrap();
    assert!(photo.as_str().ends_with(".png"));
    assert_eq!(store.read(photo.as_str()).await.unwrap(), b"png bytes");

    store.delete(&photo).await.unwrap();
    assert!(!store.path_of(photo.as_str()).unwrap().exists());
    // Idempotent.
    store.delete(&photo).await.unwrap();
  }

  #[tokio::test]
  async fn same_content_gets_distinct_files() {
    let (_dir, store) = photos().await;
    let a = store.save(b"same", "a.png").await.unwrap();
    let b = store.save(b"same", "b.png").await.unwrap();
    assert_ne!(a, b);

    store.delete(&a).await.unwrap();
    assert_eq!(store.read(b.as_str()).await.unwrap(), b"same");
  }

  #[tokio::test]
  async fn placeholder_is_left_alone() {
    let (_dir, store) = photos().await;
    let placeholder = store.path_of(PhotoRef::PLACEHOLDER).unwrap();
    tokio::fs::write(&placeholder, b"default").await.unwrap();

    store.delete(&PhotoRef::placeholder()).await.unwrap();
    assert!(placeholder.exists());
  }
}
