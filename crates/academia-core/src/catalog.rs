//! Catalog service: the exercise library plans draw from.

use std::sync::Arc;

use tracing::info;

use crate::{
  Error, Id, Result,
  error::EntityKind,
  exercise::{Exercise, ExerciseFields},
  store::GymStore,
};

pub struct Catalog<S> {
  store: Arc<S>,
}

impl<S> Clone for Catalog<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: GymStore> Catalog<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Add an exercise. Fails with a validation error if the name is taken.
  pub async fn register_exercise(&self, fields: ExerciseFields) -> Result<Exercise> {
    let fields = fields.normalized()?;
    let exercise = self
      .store
      .insert_exercise(fields)
      .await
      .map_err(Error::from_store)?;
    info!(exercise_id = exercise.id, name = %exercise.name, "exercise registered");
    Ok(exercise)
  }

  /// Replace an exercise. Keeping its own name is not a collision.
  pub async fn update_exercise(&self, id: Id, fields: ExerciseFields) -> Result<Exercise> {
    let fields = fields.normalized()?;
    let exercise = self
      .store
      .update_exercise(id, fields)
      .await
      .map_err(Error::from_store)?;
    info!(exercise_id = id, "exercise updated");
    Ok(exercise)
  }

  /// Delete an exercise. Fails with a conflict while any plan item uses it.
  pub async fn remove_exercise(&self, id: Id) -> Result<Exercise> {
    let exercise = self
      .store
      .delete_exercise(id)
      .await
      .map_err(Error::from_store)?;
    info!(exercise_id = id, "exercise removed");
    Ok(exercise)
  }

  pub async fn exercise(&self, id: Id) -> Result<Exercise> {
    self
      .store
      .get_exercise(id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::Exercise, id))
  }

  /// All exercises ordered by primary muscle group, then name.
  pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
    self.store.list_exercises().await.map_err(Error::from_store)
  }
}
