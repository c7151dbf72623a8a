//! Handlers for `/students` endpoints.
//!
//! | Method   | Path                   | Notes |
//! |----------|------------------------|-------|
//! | `GET`    | `/students`            | Ordered by name |
//! | `POST`   | `/students`            | Student fields plus optional `photo` |
//! | `GET`    | `/students/:id`        | 404 if not found |
//! | `PUT`    | `/students/:id`        | Full replacement; photo kept unless sent |
//! | `DELETE` | `/students/:id`        | Cascades to plans and items |
//! | `GET`    | `/students/:id/plans`  | Plans of one student |

use academia_core::{
  Id,
  person::{Student, StudentFields},
  photo::PhotoStore,
  plan::Plan,
  store::GymStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::{AppState, error::ApiError, outcome, payload::WithPhoto};

/// `GET /students`
pub async fn list<S, P>(
  State(state): State<AppState<S, P>>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.roster.list_students().await?))
}

/// `POST /students`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  Json(body): Json<WithPhoto<StudentFields>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let (fields, photo) = body.into_parts()?;
  let student = state.roster.register_student(fields, photo).await?;
  Ok((StatusCode::CREATED, Json(student)))
}

/// `GET /students/:id`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<Student>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.roster.student(id).await?))
}

/// `PUT /students/:id`
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(body): Json<WithPhoto<StudentFields>>,
) -> Result<Response, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let (fields, photo) = body.into_parts()?;
  let committed = state.roster.update_student(id, fields, photo).await?;
  Ok(outcome::updated(committed))
}

/// `DELETE /students/:id`
pub async fn delete<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Response, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let committed = state.roster.remove_student(id).await?;
  Ok(outcome::removed(committed))
}

/// `GET /students/:id/plans`
pub async fn plans<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<Vec<Plan>>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.plans_for_student(id).await?))
}
