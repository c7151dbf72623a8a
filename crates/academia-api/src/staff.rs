//! Handlers for `/staff` endpoints. Same shape as `/students`; deleting a
//! staff member leaves their plans in place, unassigned.

use academia_core::{
  Id,
  person::{Staff, StaffFields},
  photo::PhotoStore,
  store::GymStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::{AppState, error::ApiError, outcome, payload::WithPhoto};

/// `GET /staff`
pub async fn list<S, P>(State(state): State<AppState<S, P>>) -> Result<Json<Vec<Staff>>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.roster.list_staff().await?))
}

/// `POST /staff`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  Json(body): Json<WithPhoto<StaffFields>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let (fields, photo) = body.into_parts()?;
  let staff = state.roster.register_staff(fields, photo).await?;
  Ok((StatusCode::CREATED, Json(staff)))
}

/// `GET /staff/:id`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<Staff>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.roster.staff(id).await?))
}

/// `PUT /staff/:id`
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(body): Json<WithPhoto<StaffFields>>,
) -> Result<Response, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let (fields, photo) = body.into_parts()?;
  let committed = state.roster.update_staff(id, fields, photo).await?;
  Ok(outcome::updated(committed))
}

/// `DELETE /staff/:id`
pub async fn delete<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Response, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let committed = state.roster.remove_staff(id).await?;
  Ok(outcome::removed(committed))
}
