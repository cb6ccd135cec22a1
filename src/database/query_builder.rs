use sqlx::{Postgres, QueryBuilder};

use crate::database::models::TaskCriteria;

pub const TASK_TABLE: &str = "tasks";

pub const TASK_COLUMNS: &str =
    "id, user_id, event_name, start_time, end_time, location, description, category, created_at, updated_at";

/// Idempotent schema for the postgres backend
pub const CREATE_TASK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id          UUID PRIMARY KEY,
        user_id     UUID NOT NULL,
        event_name  TEXT NOT NULL CHECK (event_name <> ''),
        start_time  TIMESTAMPTZ NOT NULL,
        end_time    TIMESTAMPTZ NOT NULL,
        location    TEXT NOT NULL CHECK (location <> ''),
        description TEXT NOT NULL CHECK (description <> ''),
        category    TEXT NOT NULL CHECK (category <> ''),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// SELECT over all owners constrained by whichever criteria are set.
/// Values are always bound, never interpolated.
pub fn select_matching(criteria: &TaskCriteria) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", TASK_COLUMNS, TASK_TABLE));
    let mut separator = " WHERE ";

    if let Some(start_time) = criteria.start_time {
        builder.push(separator).push("start_time >= ").push_bind(start_time);
        separator = " AND ";
    }
    if let Some(end_time) = criteria.end_time {
        builder.push(separator).push("end_time <= ").push_bind(end_time);
        separator = " AND ";
    }
    if let Some(location) = &criteria.location {
        builder.push(separator).push("location = ").push_bind(location.clone());
        separator = " AND ";
    }
    if let Some(category) = &criteria.category {
        builder.push(separator).push("category = ").push_bind(category.clone());
    }

    builder.push(" ORDER BY created_at");
    builder
}
