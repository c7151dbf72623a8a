//! Roster service: registering, replacing and removing students and staff,
//! including the photo each of them carries.
//!
//! Photo writes are not transactional with the store, so every operation
//! orders them around the database write:
//!
//! 1. a new photo is saved *before* the row references it; a failed save
//!    aborts with nothing changed,
//! 2. if the row write then fails, the new photo is discarded again,
//! 3. an old photo is released only *after* the row stopped referencing it;
//!    a failed release is reported in [`Committed::storage_failure`] while the
//!    row change stands.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
  Error, Id, Result,
  error::EntityKind,
  person::{Staff, StaffFields, Student, StudentFields},
  photo::{NewPhoto, PhotoRef, PhotoStore},
  store::GymStore,
};

/// The result of a mutation whose database write committed. Photo cleanup runs
/// afterwards and may have failed independently.
#[derive(Debug)]
pub struct Committed<T> {
  pub value:           T,
  pub storage_failure: Option<Error>,
}

impl<T> Committed<T> {
  pub fn into_value(self) -> T { self.value }
}

/// Student and staff management over a [`GymStore`] and a [`PhotoStore`].
pub struct Roster<S, P> {
  store:  Arc<S>,
  photos: Arc<P>,
}

impl<S, P> Clone for Roster<S, P> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), photos: self.photos.clone() }
  }
}

impl<S: GymStore, P: PhotoStore> Roster<S, P> {
  pub fn new(store: Arc<S>, photos: Arc<P>) -> Self { Self { store, photos } }

  // ── Students ──────────────────────────────────────────────────────────────

  /// Register a student. Status defaults to active and the photo to the
  /// placeholder.
  pub async fn register_student(
    &self,
    fields: StudentFields,
    photo: Option<NewPhoto>,
  ) -> Result<Student> {
    let fields = fields.normalized()?;
    let saved = self.save_photo(photo).await?;

    let photo_ref = saved.clone().unwrap_or_default();
    match self.store.insert_student(fields, photo_ref).await {
      Ok(student) => {
        info!(student_id = student.id, "student registered");
        Ok(student)
      }
      Err(e) => {
        self.discard(saved).await;
        Err(Error::from_store(e))
      }
    }
  }

  /// Replace every field of a student, and its photo when `photo` is given.
  pub async fn update_student(
    &self,
    id: Id,
    fields: StudentFields,
    photo: Option<NewPhoto>,
  ) -> Result<Committed<Student>> {
    let fields = fields.normalized()?;
    let saved = self.save_photo(photo).await?;

    let replaced = match self.store.update_student(id, fields, saved.clone()).await {
      Ok(r) => r,
      Err(e) => {
        self.discard(saved).await;
        return Err(Error::from_store(e));
      }
    };
    info!(student_id = id, "student updated");

    let storage_failure = if replaced.previous.photo != replaced.current.photo {
      self.release(&replaced.previous.photo).await
    } else {
      None
    };
    Ok(Committed { value: replaced.current, storage_failure })
  }

  /// Remove a student with all of its plans and their items.
  pub async fn remove_student(&self, id: Id) -> Result<Committed<Student>> {
    let student = self.store.delete_student(id).await.map_err(Error::from_store)?;
    info!(student_id = id, "student removed");

    let storage_failure = self.release(&student.photo).await;
    Ok(Committed { value: student, storage_failure })
  }

  pub async fn student(&self, id: Id) -> Result<Student> {
    self
      .store
      .get_student(id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::Student, id))
  }

  /// All students, ordered by name.
  pub async fn list_students(&self) -> Result<Vec<Student>> {
    self.store.list_students().await.map_err(Error::from_store)
  }

  // ── Staff ─────────────────────────────────────────────────────────────────

  pub async fn register_staff(
    &self,
    fields: StaffFields,
    photo: Option<NewPhoto>,
  ) -> Result<Staff> {
    let fields = fields.normalized()?;
    let saved = self.save_photo(photo).await?;

    let photo_ref = saved.clone().unwrap_or_default();
    match self.store.insert_staff(fields, photo_ref).await {
      Ok(staff) => {
        info!(staff_id = staff.id, "staff member registered");
        Ok(staff)
      }
      Err(e) => {
        self.discard(saved).await;
        Err(Error::from_store(e))
      }
    }
  }

  pub async fn update_staff(
    &self,
    id: Id,
    fields: StaffFields,
    photo: Option<NewPhoto>,
  ) -> Result<Committed<Staff>> {
    let fields = fields.normalized()?;
    let saved = self.save_photo(photo).await?;

    let replaced = match self.store.update_staff(id, fields, saved.clone()).await {
      Ok(r) => r,
      Err(e) => {
        self.discard(saved).await;
        return Err(Error::from_store(e));
      }
    };
    info!(staff_id = id, "staff member updated");

    let storage_failure = if replaced.previous.photo != replaced.current.photo {
      self.release(&replaced.previous.photo).await
    } else {
      None
    };
    Ok(Committed { value: replaced.current, storage_failure })
  }

  /// Remove a staff member. Plans they were assigned to become unassigned.
  pub async fn remove_staff(&self, id: Id) -> Result<Committed<Staff>> {
    let staff = self.store.delete_staff(id).await.map_err(Error::from_store)?;
    info!(staff_id = id, "staff member removed");

    let storage_failure = self.release(&staff.photo).await;
    Ok(Committed { value: staff, storage_failure })
  }

  pub async fn staff(&self, id: Id) -> Result<Staff> {
    self
      .store
      .get_staff(id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::Staff, id))
  }

  /// All staff, ordered by name.
  pub async fn list_staff(&self) -> Result<Vec<Staff>> {
    self.store.list_staff().await.map_err(Error::from_store)
  }

  // ── Photos ────────────────────────────────────────────────────────────────

  async fn save_photo(&self, photo: Option<NewPhoto>) -> Result<Option<PhotoRef>> {
    let Some(photo) = photo else {
      return Ok(None);
    };
    let saved = self
      .photos
      .save(&photo.data, &photo.filename)
      .await
      .map_err(|e| Error::StorageFailure(Box::new(e)))?;
    debug!(photo = %saved, bytes = photo.data.len(), "photo saved");
    Ok(Some(saved))
  }

  /// Undo a save whose row write failed.
  async fn discard(&self, saved: Option<PhotoRef>) {
    if let Some(photo) = saved
      && let Err(e) = self.photos.delete(&photo).await
    {
      warn!(%photo, error = %e, "failed to discard unreferenced photo");
    }
  }

  /// Delete a photo no row references any more. The placeholder is skipped.
  async fn release(&self, photo: &PhotoRef) -> Option<Error> {
    if photo.is_placeholder() {
      return None;
    }
    match self.photos.delete(photo).await {
      Ok(()) => {
        debug!(%photo, "photo released");
        None
      }
      Err(e) => {
        warn!(%photo, error = %e, "failed to release photo");
        Some(Error::StorageFailure(Box::new(e)))
      }
    }
  }
}
