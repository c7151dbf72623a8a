//! Handlers for `/plans` and `/items` endpoints.
//!
//! | Method   | Path               | Notes |
//! |----------|--------------------|-------|
//! | `POST`   | `/plans`           | `{"student_id", "name"}` |
//! | `GET`    | `/plans/:id`       | The plan with its items and exercise names |
//! | `PATCH`  | `/plans/:id`       | `{"name"}` |
//! | `DELETE` | `/plans/:id`       | Removes its items too |
//! | `PUT`    | `/plans/:id/staff` | `{"staff_id": <id or null>}` |
//! | `GET`    | `/plans/:id/items` | Items in the order they were added |
//! | `POST`   | `/plans/:id/items` | `{"exercise_id", "sets", "reps"?, "rest_seconds"?, "notes"?}` |
//! | `GET`    | `/items/:id`       | 404 if not found |
//! | `DELETE` | `/items/:id`       | Siblings are untouched |

use academia_core::{
  Id,
  photo::PhotoStore,
  plan::{NewItem, Plan, PlanDetail, PlanItem},
  store::GymStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── Plans ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub student_id: Id,
  pub name:       String,
}

/// `POST /plans`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let plan = state.assembly.create_plan(body.student_id, body.name).await?;
  Ok((StatusCode::CREATED, Json(plan)))
}

/// `GET /plans/:id`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<PlanDetail>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.plan_detail(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub name: String,
}

/// `PATCH /plans/:id`
pub async fn rename<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(body): Json<RenameBody>,
) -> Result<Json<Plan>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.rename_plan(id, body.name).await?))
}

/// `DELETE /plans/:id`
pub async fn delete<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<StatusCode, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  state.assembly.delete_plan(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AssignBody {
  pub staff_id: Option<Id>,
}

/// `PUT /plans/:id/staff`
pub async fn assign<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(body): Json<AssignBody>,
) -> Result<Json<Plan>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.assign_staff(id, body.staff_id).await?))
}

// ─── Items ────────────────────────────────────────────────────────────────────

/// `GET /plans/:id/items`
pub async fn list_items<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<Vec<PlanItem>>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.list_items(id).await?))
}

/// `POST /plans/:id/items`
pub async fn add_item<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
  Json(item): Json<NewItem>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  let item = state.assembly.add_item(id, item).await?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /items/:id`
pub async fn get_item<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<Json<PlanItem>, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  Ok(Json(state.assembly.item(id).await?))
}

/// `DELETE /items/:id`
pub async fn remove_item<S, P>(
  State(state): State<AppState<S, P>>,
  Path(id): Path<Id>,
) -> Result<StatusCode, ApiError>
where
  S: GymStore,
  P: PhotoStore,
{
  state.assembly.remove_item(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
