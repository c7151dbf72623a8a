//! The `GymStore` trait: the entity store every service writes through.
//!
//! The trait is implemented by storage backends (e.g. `academia-store-sqlite`).
//! Services depend on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Id,
  exercise::{Exercise, ExerciseFields},
  person::{Staff, StaffFields, Student, StudentFields},
  photo::PhotoRef,
  plan::{NewItem, Plan, PlanDetail, PlanItem},
};

/// The row before and after a full-record replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replaced<T> {
  pub previous: T,
  pub current:  T,
}

/// Abstraction over a durable entity store.
///
/// Every method is atomic: it either applies completely, cascades included, or
/// not at all. Unknown ids (including unknown foreign keys on insert) surface
/// as a not-found error, uniqueness breaches as a uniqueness error; the
/// backend's error converts into [`crate::Error`] with that classification.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GymStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Students ──────────────────────────────────────────────────────────

  fn insert_student(
    &self,
    fields: StudentFields,
    photo: PhotoRef,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn get_student(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Replace every field of a student. `photo: None` keeps the stored photo.
  fn update_student(
    &self,
    id: Id,
    fields: StudentFields,
    photo: Option<PhotoRef>,
  ) -> impl Future<Output = Result<Replaced<Student>, Self::Error>> + Send + '_;

  /// Delete a student together with its plans and their items. Returns the
  /// deleted row.
  fn delete_student(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// All students ordered by name.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  // ── Staff ─────────────────────────────────────────────────────────────

  fn insert_staff(
    &self,
    fields: StaffFields,
    photo: PhotoRef,
  ) -> impl Future<Output = Result<Staff, Self::Error>> + Send + '_;

  fn get_staff(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<Staff>, Self::Error>> + Send + '_;

  fn update_staff(
    &self,
    id: Id,
    fields: StaffFields,
    photo: Option<PhotoRef>,
  ) -> impl Future<Output = Result<Replaced<Staff>, Self::Error>> + Send + '_;

  /// Delete a staff member. Plans it was assigned to keep existing with no
  /// assigned staff.
  fn delete_staff(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Staff, Self::Error>> + Send + '_;

  /// All staff ordered by name.
  fn list_staff(
    &self,
  ) -> impl Future<Output = Result<Vec<Staff>, Self::Error>> + Send + '_;

  // ── Exercises ─────────────────────────────────────────────────────────

  fn insert_exercise(
    &self,
    fields: ExerciseFields,
  ) -> impl Future<Output = Result<Exercise, Self::Error>> + Send + '_;

  fn get_exercise(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<Exercise>, Self::Error>> + Send + '_;

  fn update_exercise(
    &self,
    id: Id,
    fields: ExerciseFields,
  ) -> impl Future<Output = Result<Exercise, Self::Error>> + Send + '_;

  /// Delete an exercise. Refused while any plan item references it.
  fn delete_exercise(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Exercise, Self::Error>> + Send + '_;

  /// All exercises ordered by primary muscle group, then name.
  fn list_exercises(
    &self,
  ) -> impl Future<Output = Result<Vec<Exercise>, Self::Error>> + Send + '_;

  // ── Plans ─────────────────────────────────────────────────────────────

  /// Create an empty, unassigned plan for an existing student.
  fn insert_plan(
    &self,
    student_id: Id,
    name: String,
  ) -> impl Future<Output = Result<Plan, Self::Error>> + Send + '_;

  fn get_plan(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<Plan>, Self::Error>> + Send + '_;

  fn rename_plan(
    &self,
    id: Id,
    name: String,
  ) -> impl Future<Output = Result<Plan, Self::Error>> + Send + '_;

  /// Set or clear the assigning staff member.
  fn set_plan_staff(
    &self,
    id: Id,
    staff_id: Option<Id>,
  ) -> impl Future<Output = Result<Plan, Self::Error>> + Send + '_;

  /// Delete a plan together with its items.
  fn delete_plan(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Plan, Self::Error>> + Send + '_;

  /// Plans ordered by id; restricted to one (existing) student when
  /// `student_id` is set.
  fn list_plans(
    &self,
    student_id: Option<Id>,
  ) -> impl Future<Output = Result<Vec<Plan>, Self::Error>> + Send + '_;

  /// Materialise a plan with its items and their exercise names. Returns
  /// `None` if the plan does not exist.
  fn plan_detail(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<PlanDetail>, Self::Error>> + Send + '_;

  // ── Plan items ────────────────────────────────────────────────────────

  /// Append an item to an existing plan, referencing an existing exercise.
  fn insert_item(
    &self,
    plan_id: Id,
    item: NewItem,
  ) -> impl Future<Output = Result<PlanItem, Self::Error>> + Send + '_;

  fn get_item(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<PlanItem>, Self::Error>> + Send + '_;

  fn delete_item(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<PlanItem, Self::Error>> + Send + '_;

  /// Items of an existing plan in creation order.
  fn list_items(
    &self,
    plan_id: Id,
  ) -> impl Future<Output = Result<Vec<PlanItem>, Self::Error>> + Send + '_;
}
