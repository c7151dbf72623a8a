//! [`SqliteStore`]: the SQLite implementation of [`GymStore`].

use std::path::Path;

use academia_core::{
  EntityKind, Id,
  exercise::{Exercise, ExerciseFields},
  person::{Staff, StaffFields, Student, StudentFields},
  photo::PhotoRef,
  plan::{ItemLine, NewItem, Plan, PlanDetail, PlanItem},
  store::{GymStore, Replaced},
};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{
  Error, Result,
  encode::{
    EXERCISE_COLUMNS, ITEM_COLUMNS, PLAN_COLUMNS, RawExercise, RawPlan, RawStaff, RawStudent,
    STAFF_COLUMNS, STUDENT_COLUMNS, encode_date, encode_dt, encode_groups, encode_status,
    item_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Academia entity store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// run one after another on the connection's thread, each inside its own
/// transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` on the connection thread, carrying our own error type through.
  async fn run<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }
}

// ─── Row helpers (run on the connection thread) ──────────────────────────────

fn exists(conn: &Connection, table: &str, id: Id) -> Result<bool> {
  let found = conn
    .query_row(&format!("SELECT 1 FROM {table} WHERE id = ?1"), params![id], |_| Ok(()))
    .optional()?;
  Ok(found.is_some())
}

fn ensure_exists(conn: &Connection, kind: EntityKind, id: Id) -> Result<()> {
  let table = match kind {
    EntityKind::Student => "students",
    EntityKind::Staff => "staff",
    EntityKind::Exercise => "exercises",
    EntityKind::Plan => "plans",
    EntityKind::PlanItem => "plan_items",
  };
  if exists(conn, table, id)? { Ok(()) } else { Err(Error::NotFound { kind, id }) }
}

fn fetch_student(conn: &Connection, id: Id) -> Result<Option<Student>> {
  conn
    .query_row(
      &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
      params![id],
      RawStudent::from_row,
    )
    .optional()?
    .map(RawStudent::into_student)
    .transpose()
}

fn require_student(conn: &Connection, id: Id) -> Result<Student> {
  fetch_student(conn, id)?.ok_or(Error::NotFound { kind: EntityKind::Student, id })
}

fn fetch_staff(conn: &Connection, id: Id) -> Result<Option<Staff>> {
  conn
    .query_row(
      &format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?1"),
      params![id],
      RawStaff::from_row,
    )
    .optional()?
    .map(RawStaff::into_staff)
    .transpose()
}

fn require_staff(conn: &Connection, id: Id) -> Result<Staff> {
  fetch_staff(conn, id)?.ok_or(Error::NotFound { kind: EntityKind::Staff, id })
}

fn fetch_exercise(conn: &Connection, id: Id) -> Result<Option<Exercise>> {
  conn
    .query_row(
      &format!("SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1"),
      params![id],
      RawExercise::from_row,
    )
    .optional()?
    .map(RawExercise::into_exercise)
    .transpose()
}

fn require_exercise(conn: &Connection, id: Id) -> Result<Exercise> {
  fetch_exercise(conn, id)?.ok_or(Error::NotFound { kind: EntityKind::Exercise, id })
}

fn fetch_plan(conn: &Connection, id: Id) -> Result<Option<Plan>> {
  conn
    .query_row(
      &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
      params![id],
      RawPlan::from_row,
    )
    .optional()?
    .map(RawPlan::into_plan)
    .transpose()
}

fn require_plan(conn: &Connection, id: Id) -> Result<Plan> {
  fetch_plan(conn, id)?.ok_or(Error::NotFound { kind: EntityKind::Plan, id })
}

fn fetch_item(conn: &Connection, id: Id) -> Result<Option<PlanItem>> {
  Ok(
    conn
      .query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM plan_items WHERE id = ?1"),
        params![id],
        item_from_row,
      )
      .optional()?,
  )
}

fn require_item(conn: &Connection, id: Id) -> Result<PlanItem> {
  fetch_item(conn, id)?.ok_or(Error::NotFound { kind: EntityKind::PlanItem, id })
}

// ─── GymStore impl ───────────────────────────────────────────────────────────

impl GymStore for SqliteStore {
  type Error = Error;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn insert_student(&self, fields: StudentFields, photo: PhotoRef) -> Result<Student> {
    let enrolled_on = fields.enrolled_on.unwrap_or_else(|| Utc::now().date_naive());

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO students (
             name, photo, national_id, birth_date, street, city, state,
             postal_code, phone, email, enrolled_on, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          params![
            fields.name,
            photo.as_str(),
            fields.national_id,
            encode_date(fields.birth_date),
            fields.address.street,
            fields.address.city,
            fields.address.state,
            fields.address.postal_code,
            fields.phone,
            fields.email,
            encode_date(enrolled_on),
            encode_status(fields.status),
          ],
        )?;
        let student = require_student(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(student)
      })
      .await
  }

  async fn get_student(&self, id: Id) -> Result<Option<Student>> {
    self.run(move |conn| fetch_student(conn, id)).await
  }

  async fn update_student(
    &self,
    id: Id,
    fields: StudentFields,
    photo: Option<PhotoRef>,
  ) -> Result<Replaced<Student>> {
    let photo = photo.map(|p| p.as_str().to_owned());

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let previous = require_student(&tx, id)?;
        tx.execute(
          "UPDATE students SET
             name = ?2, photo = COALESCE(?3, photo), national_id = ?4,
             birth_date = ?5, street = ?6, city = ?7, state = ?8,
             postal_code = ?9, phone = ?10, email = ?11,
             enrolled_on = COALESCE(?12, enrolled_on),
             status = ?13
           WHERE id = ?1",
          params![
            id,
            fields.name,
            photo,
            fields.national_id,
            encode_date(fields.birth_date),
            fields.address.street,
            fields.address.city,
            fields.address.state,
            fields.address.postal_code,
            fields.phone,
            fields.email,
            fields.enrolled_on.map(encode_date),
            encode_status(fields.status),
          ],
        )?;
        let current = require_student(&tx, id)?;
        tx.commit()?;
        Ok(Replaced { previous, current })
      })
      .await
  }

  async fn delete_student(&self, id: Id) -> Result<Student> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let student = require_student(&tx, id)?;
        // Explicit cascade; the schema's ON DELETE CASCADE is the backstop.
        tx.execute(
          "DELETE FROM plan_items
           WHERE plan_id IN (SELECT id FROM plans WHERE student_id = ?1)",
          params![id],
        )?;
        tx.execute("DELETE FROM plans WHERE student_id = ?1", params![id])?;
        tx.execute("DELETE FROM students WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(student)
      })
      .await
  }

  async fn list_students(&self) -> Result<Vec<Student>> {
    self
      .run(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY name, id"))?;
        let raws = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawStudent::into_student).collect()
      })
      .await
  }

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn insert_staff(&self, fields: StaffFields, photo: PhotoRef) -> Result<Staff> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO staff (
             name, photo, role, credential_id, street, city, state,
             postal_code, phone, email, admitted_on
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          params![
            fields.name,
            photo.as_str(),
            fields.role,
            fields.credential_id,
            fields.address.street,
            fields.address.city,
            fields.address.state,
            fields.address.postal_code,
            fields.phone,
            fields.email,
            fields.admitted_on.map(encode_date),
          ],
        )?;
        let staff = require_staff(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(staff)
      })
      .await
  }

  async fn get_staff(&self, id: Id) -> Result<Option<Staff>> {
    self.run(move |conn| fetch_staff(conn, id)).await
  }

  async fn update_staff(
    &self,
    id: Id,
    fields: StaffFields,
    photo: Option<PhotoRef>,
  ) -> Result<Replaced<Staff>> {
    let photo = photo.map(|p| p.as_str().to_owned());

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let previous = require_staff(&tx, id)?;
        tx.execute(
          "UPDATE staff SET
             name = ?2, photo = COALESCE(?3, photo), role = ?4,
             credential_id = ?5, street = ?6, city = ?7, state = ?8,
             postal_code = ?9, phone = ?10, email = ?11, admitted_on = ?12
           WHERE id = ?1",
          params![
            id,
            fields.name,
            photo,
            fields.role,
            fields.credential_id,
            fields.address.street,
            fields.address.city,
            fields.address.state,
            fields.address.postal_code,
            fields.phone,
            fields.email,
            fields.admitted_on.map(encode_date),
          ],
        )?;
        let current = require_staff(&tx, id)?;
        tx.commit()?;
        Ok(Replaced { previous, current })
      })
      .await
  }

  async fn delete_staff(&self, id: Id) -> Result<Staff> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let staff = require_staff(&tx, id)?;
        tx.execute("UPDATE plans SET staff_id = NULL WHERE staff_id = ?1", params![id])?;
        tx.execute("DELETE FROM staff WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(staff)
      })
      .await
  }

  async fn list_staff(&self) -> Result<Vec<Staff>> {
    self
      .run(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {STAFF_COLUMNS} FROM staff ORDER BY name, id"))?;
        let raws = stmt
          .query_map([], RawStaff::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawStaff::into_staff).collect()
      })
      .await
  }

  // ── Exercises ─────────────────────────────────────────────────────────────

  async fn insert_exercise(&self, fields: ExerciseFields) -> Result<Exercise> {
    let groups = encode_groups(&fields.muscle_groups);

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO exercises (name, muscle_groups, description) VALUES (?1, ?2, ?3)",
          params![fields.name, groups, fields.description],
        )?;
        let exercise = require_exercise(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(exercise)
      })
      .await
  }

  async fn get_exercise(&self, id: Id) -> Result<Option<Exercise>> {
    self.run(move |conn| fetch_exercise(conn, id)).await
  }

  async fn update_exercise(&self, id: Id, fields: ExerciseFields) -> Result<Exercise> {
    let groups = encode_groups(&fields.muscle_groups);

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        ensure_exists(&tx, EntityKind::Exercise, id)?;
        tx.execute(
          "UPDATE exercises SET name = ?2, muscle_groups = ?3, description = ?4
           WHERE id = ?1",
          params![id, fields.name, groups, fields.description],
        )?;
        let exercise = require_exercise(&tx, id)?;
        tx.commit()?;
        Ok(exercise)
      })
      .await
  }

  async fn delete_exercise(&self, id: Id) -> Result<Exercise> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let exercise = require_exercise(&tx, id)?;
        let count: i64 = tx.query_row(
          "SELECT COUNT(*) FROM plan_items WHERE exercise_id = ?1",
          params![id],
          |r| r.get(0),
        )?;
        if count > 0 {
          return Err(Error::Referenced { kind: EntityKind::Exercise, id, count });
        }
        tx.execute("DELETE FROM exercises WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(exercise)
      })
      .await
  }

  async fn list_exercises(&self) -> Result<Vec<Exercise>> {
    self
      .run(|conn| {
        // The primary group is the first entry of the canonical list.
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXERCISE_COLUMNS} FROM exercises
           ORDER BY
             CASE WHEN instr(muscle_groups, ',') > 0
                  THEN substr(muscle_groups, 1, instr(muscle_groups, ',') - 1)
                  ELSE muscle_groups
             END,
             name, id"
        ))?;
        let raws = stmt
          .query_map([], RawExercise::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawExercise::into_exercise).collect()
      })
      .await
  }

  // ── Plans ─────────────────────────────────────────────────────────────────

  async fn insert_plan(&self, student_id: Id, name: String) -> Result<Plan> {
    let created_at = encode_dt(Utc::now());

    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        ensure_exists(&tx, EntityKind::Student, student_id)?;
        tx.execute(
          "INSERT INTO plans (student_id, staff_id, name, created_at) VALUES (?1, NULL, ?2, ?3)",
          params![student_id, name, created_at],
        )?;
        let plan = require_plan(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(plan)
      })
      .await
  }

  async fn get_plan(&self, id: Id) -> Result<Option<Plan>> {
    self.run(move |conn| fetch_plan(conn, id)).await
  }

  async fn rename_plan(&self, id: Id, name: String) -> Result<Plan> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        ensure_exists(&tx, EntityKind::Plan, id)?;
        tx.execute("UPDATE plans SET name = ?2 WHERE id = ?1", params![id, name])?;
        let plan = require_plan(&tx, id)?;
        tx.commit()?;
        Ok(plan)
      })
      .await
  }

  async fn set_plan_staff(&self, id: Id, staff_id: Option<Id>) -> Result<Plan> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        ensure_exists(&tx, EntityKind::Plan, id)?;
        if let Some(staff_id) = staff_id {
          ensure_exists(&tx, EntityKind::Staff, staff_id)?;
        }
        tx.execute("UPDATE plans SET staff_id = ?2 WHERE id = ?1", params![id, staff_id])?;
        let plan = require_plan(&tx, id)?;
        tx.commit()?;
        Ok(plan)
      })
      .await
  }

  async fn delete_plan(&self, id: Id) -> Result<Plan> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let plan = require_plan(&tx, id)?;
        tx.execute("DELETE FROM plan_items WHERE plan_id = ?1", params![id])?;
        tx.execute("DELETE FROM plans WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(plan)
      })
      .await
  }

  async fn list_plans(&self, student_id: Option<Id>) -> Result<Vec<Plan>> {
    self
      .run(move |conn| {
        let raws = if let Some(student_id) = student_id {
          ensure_exists(conn, EntityKind::Student, student_id)?;
          let mut stmt = conn.prepare(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE student_id = ?1 ORDER BY id"
          ))?;
          stmt
            .query_map(params![student_id], RawPlan::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY id"))?;
          stmt
            .query_map([], RawPlan::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        raws.into_iter().map(RawPlan::into_plan).collect()
      })
      .await
  }

  async fn plan_detail(&self, id: Id) -> Result<Option<PlanDetail>> {
    self
      .run(move |conn| {
        let Some(plan) = fetch_plan(conn, id)? else {
          return Ok(None);
        };
        let mut stmt = conn.prepare(
          "SELECT i.id, i.plan_id, i.exercise_id, i.sets, i.reps, i.rest_seconds, i.notes,
                  e.name
           FROM plan_items i
           JOIN exercises e ON e.id = i.exercise_id
           WHERE i.plan_id = ?1
           ORDER BY i.id",
        )?;
        let items = stmt
          .query_map(params![id], |row| {
            Ok(ItemLine {
              item:          item_from_row(row)?,
              exercise_name: row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(PlanDetail { plan, items }))
      })
      .await
  }

  // ── Plan items ────────────────────────────────────────────────────────────

  async fn insert_item(&self, plan_id: Id, item: NewItem) -> Result<PlanItem> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        ensure_exists(&tx, EntityKind::Plan, plan_id)?;
        ensure_exists(&tx, EntityKind::Exercise, item.exercise_id)?;
        tx.execute(
          "INSERT INTO plan_items (plan_id, exercise_id, sets, reps, rest_seconds, notes)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params![plan_id, item.exercise_id, item.sets, item.reps, item.rest_seconds, item.notes],
        )?;
        let item = require_item(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(item)
      })
      .await
  }

  async fn get_item(&self, id: Id) -> Result<Option<PlanItem>> {
    self.run(move |conn| fetch_item(conn, id)).await
  }

  async fn delete_item(&self, id: Id) -> Result<PlanItem> {
    self
      .run(move |conn| {
        let tx = conn.transaction()?;
        let item = require_item(&tx, id)?;
        tx.execute("DELETE FROM plan_items WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(item)
      })
      .await
  }

  async fn list_items(&self, plan_id: Id) -> Result<Vec<PlanItem>> {
    self
      .run(move |conn| {
        ensure_exists(conn, EntityKind::Plan, plan_id)?;
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM plan_items WHERE plan_id = ?1 ORDER BY id"
        ))?;
        let items = stmt
          .query_map(params![plan_id], item_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
      })
      .await
  }
}
