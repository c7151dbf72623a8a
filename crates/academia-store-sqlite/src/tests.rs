//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeSet;

use academia_core::{
  EntityKind,
  exercise::{ExerciseFields, MuscleGroup},
  person::{StaffFields, StudentFields, StudentStatus},
  photo::PhotoRef,
  plan::NewItem,
  store::GymStore,
};
use chrono::NaiveDate;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn student(name: &str, national_id: &str) -> StudentFields {
  let mut f = StudentFields::new(name, national_id, date(2000, 1, 1));
  f.enrolled_on = Some(date(2024, 3, 1));
  f
}

fn exercise(name: &str, groups: &[MuscleGroup]) -> ExerciseFields {
  ExerciseFields::new(name, groups.iter().copied().collect::<BTreeSet<_>>())
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_student() {
  let s = store().await;

  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  assert_eq!(ana.id, 1);
  assert_eq!(ana.status, StudentStatus::Active);
  assert!(ana.photo.is_placeholder());

  let fetched = s.get_student(ana.id).await.unwrap().unwrap();
  assert_eq!(fetched, ana);
}

#[tokio::test]
async fn get_student_missing_returns_none() {
  let s = store().await;
  assert!(s.get_student(42).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_national_id_is_a_uniqueness_error() {
  let s = store().await;
  s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();

  let err = s
    .insert_student(student("Bia", "111"), PhotoRef::placeholder())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unique { ref column, .. } if column == "national_id"));
  assert_eq!(s.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn absent_emails_never_collide() {
  let s = store().await;
  s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  s.insert_student(student("Bia", "222"), PhotoRef::placeholder()).await.unwrap();

  let mut dup = student("Caio", "333");
  dup.email = Some("x@example.com".into());
  s.insert_student(dup.clone(), PhotoRef::placeholder()).await.unwrap();
  dup.national_id = "444".into();
  let err = s.insert_student(dup, PhotoRef::placeholder()).await.unwrap_err();
  assert!(matches!(err, Error::Unique { ref column, .. } if column == "email"));
}

#[tokio::test]
async fn update_student_keeps_photo_unless_given() {
  let s = store().await;
  let ana = s
    .insert_student(student("Ana", "111"), PhotoRef::new("a.png"))
    .await
    .unwrap();

  let mut fields = student("Ana Maria", "111");
  fields.status = StudentStatus::Inactive;
  let r = s.update_student(ana.id, fields.clone(), None).await.unwrap();
  assert_eq!(r.previous.name, "Ana");
  assert_eq!(r.current.name, "Ana Maria");
  assert_eq!(r.current.status, StudentStatus::Inactive);
  assert_eq!(r.current.photo, PhotoRef::new("a.png"));

  let r = s
    .update_student(ana.id, fields, Some(PhotoRef::new("b.png")))
    .await
    .unwrap();
  assert_eq!(r.previous.photo, PhotoRef::new("a.png"));
  assert_eq!(r.current.photo, PhotoRef::new("b.png"));
}

#[tokio::test]
async fn update_missing_student_is_not_found() {
  let s = store().await;
  let err = s.update_student(9, student("X", "1"), None).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Student, id: 9 }));
}

#[tokio::test]
async fn list_students_orders_by_name() {
  let s = store().await;
  for (name, nid) in [("Caio", "3"), ("Ana", "1"), ("Bia", "2")] {
    s.insert_student(student(name, nid), PhotoRef::placeholder()).await.unwrap();
  }
  let names: Vec<_> =
    s.list_students().await.unwrap().into_iter().map(|st| st.name).collect();
  assert_eq!(names, ["Ana", "Bia", "Caio"]);
}

#[tokio::test]
async fn delete_student_cascades_to_plans_and_items() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let bia = s.insert_student(student("Bia", "222"), PhotoRef::placeholder()).await.unwrap();
  let squat = s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs])).await.unwrap();

  let a1 = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let a2 = s.insert_plan(ana.id, "B".into()).await.unwrap();
  let b1 = s.insert_plan(bia.id, "C".into()).await.unwrap();
  let i1 = s.insert_item(a1.id, NewItem::new(squat.id, "3")).await.unwrap();
  s.insert_item(a2.id, NewItem::new(squat.id, "4")).await.unwrap();
  let kept = s.insert_item(b1.id, NewItem::new(squat.id, "5")).await.unwrap();

  let deleted = s.delete_student(ana.id).await.unwrap();
  assert_eq!(deleted.name, "Ana");

  assert!(s.get_student(ana.id).await.unwrap().is_none());
  assert!(s.get_plan(a1.id).await.unwrap().is_none());
  assert!(s.get_plan(a2.id).await.unwrap().is_none());
  assert!(s.get_item(i1.id).await.unwrap().is_none());
  assert_eq!(s.list_plans(None).await.unwrap().len(), 1);
  assert_eq!(s.get_item(kept.id).await.unwrap(), Some(kept));
}

#[tokio::test]
async fn second_delete_is_not_found() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  s.delete_student(ana.id).await.unwrap();
  let err = s.delete_student(ana.id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Student, .. }));
}

// ─── Staff ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn staff_roundtrip_and_unique_credential() {
  let s = store().await;
  let mut fields = StaffFields::new("Rui", "trainer");
  fields.credential_id = Some("CREF-1".into());
  fields.admitted_on = Some(date(2020, 5, 4));

  let rui = s.insert_staff(fields.clone(), PhotoRef::placeholder()).await.unwrap();
  assert_eq!(s.get_staff(rui.id).await.unwrap(), Some(rui.clone()));
  assert_eq!(rui.admitted_on, Some(date(2020, 5, 4)));

  fields.name = "Other".into();
  let err = s.insert_staff(fields, PhotoRef::placeholder()).await.unwrap_err();
  assert!(matches!(err, Error::Unique { ref column, .. } if column == "credential_id"));
}

#[tokio::test]
async fn delete_staff_unassigns_plans() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let rui = s
    .insert_staff(StaffFields::new("Rui", "trainer"), PhotoRef::placeholder())
    .await
    .unwrap();
  let plan = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let plan = s.set_plan_staff(plan.id, Some(rui.id)).await.unwrap();
  assert_eq!(plan.staff_id, Some(rui.id));

  s.delete_staff(rui.id).await.unwrap();
  let plan = s.get_plan(plan.id).await.unwrap().unwrap();
  assert_eq!(plan.staff_id, None);
}

#[tokio::test]
async fn set_plan_staff_rejects_unknown_staff() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let plan = s.insert_plan(ana.id, "A".into()).await.unwrap();

  let err = s.set_plan_staff(plan.id, Some(77)).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Staff, id: 77 }));
}

// ─── Exercises ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn exercises_list_by_primary_group_then_name() {
  let s = store().await;
  s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs, MuscleGroup::Glutes]))
    .await
    .unwrap();
  s.insert_exercise(exercise("Crunch", &[MuscleGroup::Abs])).await.unwrap();
  s.insert_exercise(exercise("Burpee", &[MuscleGroup::FullBody, MuscleGroup::Cardio]))
    .await
    .unwrap();
  s.insert_exercise(exercise("Bench Press", &[MuscleGroup::Chest])).await.unwrap();
  s.insert_exercise(exercise("Lunge", &[MuscleGroup::Legs])).await.unwrap();

  let names: Vec<_> =
    s.list_exercises().await.unwrap().into_iter().map(|e| e.name).collect();
  // abs < cardio (Burpee) < chest < glutes (Squat) < legs (Lunge)
  assert_eq!(names, ["Crunch", "Burpee", "Bench Press", "Squat", "Lunge"]);
}

#[tokio::test]
async fn exercise_in_use_cannot_be_deleted() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let squat = s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs])).await.unwrap();
  let plan = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let item = s.insert_item(plan.id, NewItem::new(squat.id, "3")).await.unwrap();

  let err = s.delete_exercise(squat.id).await.unwrap_err();
  assert!(matches!(err, Error::Referenced { count: 1, .. }));

  s.delete_item(item.id).await.unwrap();
  s.delete_exercise(squat.id).await.unwrap();
  assert!(s.get_exercise(squat.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_exercise_replaces_groups() {
  let s = store().await;
  let e = s.insert_exercise(exercise("Row", &[MuscleGroup::Back])).await.unwrap();
  let e = s
    .update_exercise(e.id, exercise("Row", &[MuscleGroup::Back, MuscleGroup::Biceps]))
    .await
    .unwrap();
  assert_eq!(e.muscle_groups.len(), 2);
  assert_eq!(e.primary_group(), Some(MuscleGroup::Back));
}

// ─── Plans and items ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_plan_for_unknown_student_creates_nothing() {
  let s = store().await;
  let err = s.insert_plan(5, "A".into()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Student, id: 5 }));
  assert!(s.list_plans(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_item_checks_plan_and_exercise() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let plan = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let squat = s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs])).await.unwrap();

  let err = s.insert_item(99, NewItem::new(squat.id, "3")).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Plan, id: 99 }));

  let err = s.insert_item(plan.id, NewItem::new(99, "3")).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Exercise, id: 99 }));

  assert!(s.list_items(plan.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn plan_detail_joins_exercise_names_in_order() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let plan = s.insert_plan(ana.id, "Plano A".into()).await.unwrap();
  let squat = s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs])).await.unwrap();
  let row = s.insert_exercise(exercise("Row", &[MuscleGroup::Back])).await.unwrap();

  let mut item = NewItem::new(squat.id, "3");
  item.reps = Some("12".into());
  item.rest_seconds = Some(60);
  s.insert_item(plan.id, item).await.unwrap();
  s.insert_item(plan.id, NewItem::new(row.id, "4")).await.unwrap();

  let detail = s.plan_detail(plan.id).await.unwrap().unwrap();
  assert_eq!(detail.plan, plan);
  assert_eq!(detail.item_count(), 2);
  assert_eq!(detail.items[0].exercise_name, "Squat");
  assert_eq!(detail.items[0].item.rest_seconds, Some(60));
  assert_eq!(detail.items[1].exercise_name, "Row");

  assert!(s.plan_detail(99).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_plan_removes_items_only_of_that_plan() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let squat = s.insert_exercise(exercise("Squat", &[MuscleGroup::Legs])).await.unwrap();
  let a = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let b = s.insert_plan(ana.id, "B".into()).await.unwrap();
  s.insert_item(a.id, NewItem::new(squat.id, "3")).await.unwrap();
  s.insert_item(b.id, NewItem::new(squat.id, "3")).await.unwrap();

  s.delete_plan(a.id).await.unwrap();
  assert!(s.get_plan(a.id).await.unwrap().is_none());
  assert_eq!(s.list_items(b.id).await.unwrap().len(), 1);
  assert!(matches!(
    s.list_items(a.id).await.unwrap_err(),
    Error::NotFound { kind: EntityKind::Plan, .. }
  ));
}

#[tokio::test]
async fn list_plans_for_student() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let bia = s.insert_student(student("Bia", "222"), PhotoRef::placeholder()).await.unwrap();
  s.insert_plan(ana.id, "A".into()).await.unwrap();
  s.insert_plan(bia.id, "B".into()).await.unwrap();
  s.insert_plan(ana.id, "C".into()).await.unwrap();

  let names: Vec<_> =
    s.list_plans(Some(ana.id)).await.unwrap().into_iter().map(|p| p.name).collect();
  assert_eq!(names, ["A", "C"]);

  let err = s.list_plans(Some(99)).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Student, .. }));
}

#[tokio::test]
async fn rename_plan() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  let plan = s.insert_plan(ana.id, "A".into()).await.unwrap();
  let renamed = s.rename_plan(plan.id, "Upper body".into()).await.unwrap();
  assert_eq!(renamed.name, "Upper body");
  assert_eq!(renamed.created_at, plan.created_at);
}

#[tokio::test]
async fn ids_are_never_reused() {
  let s = store().await;
  let ana = s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  s.delete_student(ana.id).await.unwrap();
  let bia = s.insert_student(student("Bia", "222"), PhotoRef::placeholder()).await.unwrap();
  assert!(bia.id > ana.id);
}

#[tokio::test]
async fn opens_file_backed_store_twice() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("academia.db");
  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_student(student("Ana", "111"), PhotoRef::placeholder()).await.unwrap();
  }
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_students().await.unwrap().len(), 1);
}
