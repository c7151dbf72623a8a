//! SQL schema for the Academia SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS students (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    photo        TEXT NOT NULL DEFAULT 'default.png',
    national_id  TEXT NOT NULL UNIQUE,
    birth_date   TEXT NOT NULL,          -- YYYY-MM-DD
    street       TEXT,
    city         TEXT,
    state        TEXT,
    postal_code  TEXT,
    phone        TEXT,
    email        TEXT UNIQUE,            -- NULLs never collide
    enrolled_on  TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'active'
                 CHECK (status IN ('active', 'inactive'))
);

CREATE TABLE IF NOT EXISTS staff (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    photo          TEXT NOT NULL DEFAULT 'default.png',
    role           TEXT NOT NULL,
    credential_id  TEXT UNIQUE,
    street         TEXT,
    city           TEXT,
    state          TEXT,
    postal_code    TEXT,
    phone          TEXT,
    email          TEXT UNIQUE,
    admitted_on    TEXT
);

CREATE TABLE IF NOT EXISTS exercises (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL UNIQUE,
    muscle_groups  TEXT NOT NULL,        -- comma-joined, alphabetical
    description    TEXT
);

CREATE TABLE IF NOT EXISTS plans (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id  INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    staff_id    INTEGER REFERENCES staff(id) ON DELETE SET NULL,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL            -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS plan_items (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    plan_id       INTEGER NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
    exercise_id   INTEGER NOT NULL REFERENCES exercises(id) ON DELETE RESTRICT,
    sets          TEXT NOT NULL,
    reps          TEXT,
    rest_seconds  INTEGER CHECK (rest_seconds IS NULL OR rest_seconds >= 0),
    notes         TEXT
);

CREATE INDEX IF NOT EXISTS plans_student_idx   ON plans(student_id);
CREATE INDEX IF NOT EXISTS plans_staff_idx     ON plans(staff_id);
CREATE INDEX IF NOT EXISTS items_plan_idx      ON plan_items(plan_id);
CREATE INDEX IF NOT EXISTS items_exercise_idx  ON plan_items(exercise_id);

PRAGMA user_version = 1;
";
