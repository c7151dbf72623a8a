//! Plan assembly: building a workout program for one student.
//!
//! A plan has no states beyond "exists, with N ≥ 0 items". Items come and go
//! through [`PlanAssembly::add_item`] and [`PlanAssembly::remove_item`]; the
//! only terminal transition is deleting the plan (or its student).

use std::sync::Arc;

use tracing::info;

use crate::{
  Error, Id, Result,
  error::EntityKind,
  plan::{NewItem, Plan, PlanDetail, PlanItem, plan_name},
  store::GymStore,
};

pub struct PlanAssembly<S> {
  store: Arc<S>,
}

impl<S> Clone for PlanAssembly<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: GymStore> PlanAssembly<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  // ── Plans ─────────────────────────────────────────────────────────────────

  /// Start an empty, unassigned plan for `student_id`.
  pub async fn create_plan(&self, student_id: Id, name: String) -> Result<Plan> {
    let name = plan_name(name)?;
    let plan = self
      .store
      .insert_plan(student_id, name)
      .await
      .map_err(Error::from_store)?;
    info!(plan_id = plan.id, student_id, "plan created");
    Ok(plan)
  }

  /// Delete a plan and every item in it.
  pub async fn delete_plan(&self, plan_id: Id) -> Result<Plan> {
    let plan = self
      .store
      .delete_plan(plan_id)
      .await
      .map_err(Error::from_store)?;
    info!(plan_id, "plan deleted");
    Ok(plan)
  }

  pub async fn rename_plan(&self, plan_id: Id, name: String) -> Result<Plan> {
    let name = plan_name(name)?;
    self
      .store
      .rename_plan(plan_id, name)
      .await
      .map_err(Error::from_store)
  }

  /// Record which staff member assigned the plan; `None` clears it.
  pub async fn assign_staff(&self, plan_id: Id, staff_id: Option<Id>) -> Result<Plan> {
    let plan = self
      .store
      .set_plan_staff(plan_id, staff_id)
      .await
      .map_err(Error::from_store)?;
    info!(plan_id, ?staff_id, "plan staff assignment changed");
    Ok(plan)
  }

  pub async fn plan(&self, plan_id: Id) -> Result<Plan> {
    self
      .store
      .get_plan(plan_id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::Plan, plan_id))
  }

  /// The plan with its items, each joined with its exercise name.
  pub async fn plan_detail(&self, plan_id: Id) -> Result<PlanDetail> {
    self
      .store
      .plan_detail(plan_id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::Plan, plan_id))
  }

  pub async fn plans_for_student(&self, student_id: Id) -> Result<Vec<Plan>> {
    self
      .store
      .list_plans(Some(student_id))
      .await
      .map_err(Error::from_store)
  }

  // ── Items ─────────────────────────────────────────────────────────────────

  /// Append an exercise prescription to a plan.
  pub async fn add_item(&self, plan_id: Id, item: NewItem) -> Result<PlanItem> {
    let item = item.normalized()?;
    let item = self
      .store
      .insert_item(plan_id, item)
      .await
      .map_err(Error::from_store)?;
    info!(plan_id, item_id = item.id, exercise_id = item.exercise_id, "item added");
    Ok(item)
  }

  /// Remove one item; its siblings and the plan are untouched.
  pub async fn remove_item(&self, item_id: Id) -> Result<PlanItem> {
    let item = self
      .store
      .delete_item(item_id)
      .await
      .map_err(Error::from_store)?;
    info!(plan_id = item.plan_id, item_id, "item removed");
    Ok(item)
  }

  pub async fn item(&self, item_id: Id) -> Result<PlanItem> {
    self
      .store
      .get_item(item_id)
      .await
      .map_err(Error::from_store)?
      .ok_or(Error::not_found(EntityKind::PlanItem, item_id))
  }

  /// Items of a plan in the order they were added.
  pub async fn list_items(&self, plan_id: Id) -> Result<Vec<PlanItem>> {
    self
      .store
      .list_items(plan_id)
      .await
      .map_err(Error::from_store)
  }
}
