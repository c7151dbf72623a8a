//! Handlers for `/exercises` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/exercises`      | Ordered by primary muscle group, then name |
//! | `POST`   | `/exercises`      | `{"name", "muscle_groups": [...], "description"?}` |
//! | `GET`    | `/exercises/:id`  | 404 if not found |
//! | `PUT`    | `/exercises/:id`  | Full replacement |
//! | `DELETE` | `/exercises/:id`  | 409 while a plan item uses it |

use academia_core::{
  Id,
  exercise::{Exercise, ExerciseFields},
  photo::PhotoStore,
  store::GymStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};

use crate::{AppState, error::ApiError};

/// `GET /exercises`
pub async fn list<S, P>(
  State(state): State<AppState<S, P>>,
) -> Result<Json<Vec<Exercise>>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.catalog.list_exercises().await?))
}

/// `POST /exercises`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  Json(fields): Json<ExerciseFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let exercise = state.catalog.register_exercise(fields).await?;
  Ok((StatusCode::CREATED, Json(exercise)))
}

/// `GET /exercises/:id`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<Exercise>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.catalog.exercise(id).await?))
}

/// `PUT /exercises/:id`
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(fields): Json<ExerciseFields>,
) -> Result<Json<Exercise>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.catalog.update_exercise(id, fields).await?))
}

/// `DELETE /exercises/:id`
pub async fn delete<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<StatusCode, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  state.catalog.remove_exercise(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
