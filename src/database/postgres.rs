use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskCriteria, TaskFields};
use crate::database::query_builder::{self, CREATE_TASK_TABLE, TASK_COLUMNS};
use crate::database::store::TaskStore;

/// Task store backed by a postgres `tasks` table
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_TASK_TABLE).execute(&self.pool).await?;
        debug!("tasks table ready");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at", TASK_COLUMNS);
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE user_id = $1 AND id = $2", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn insert(&self, owner: Uuid, fields: &TaskFields) -> Result<Task, DatabaseError> {
        let content = fields.validate().map_err(DatabaseError::Validation)?;
        let sql = format!(
            "INSERT INTO tasks (id, user_id, event_name, start_time, end_time, location, description, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(&content.event_name)
            .bind(content.start_time)
            .bind(content.end_time)
            .bind(&content.location)
            .bind(&content.description)
            .bind(&content.category)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn replace(&self, id: Uuid, fields: &TaskFields) -> Result<Option<Task>, DatabaseError> {
        let content = fields.validate().map_err(DatabaseError::Validation)?;
        let sql = format!(
            "UPDATE tasks SET event_name = $2, start_time = $3, end_time = $4, location = $5, \
             description = $6, category = $7, updated_at = now() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(&content.event_name)
            .bind(content.start_time)
            .bind(content.end_time)
            .bind(&content.location)
            .bind(&content.description)
            .bind(&content.category)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_matching(&self, criteria: &TaskCriteria) -> Result<Vec<Task>, DatabaseError> {
        let mut builder = query_builder::select_matching(criteria);
        let tasks = builder.build_query_as::<Task>().fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
