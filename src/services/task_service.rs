use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskCriteria, TaskFields, TaskFilterParams};
use crate::database::store::TaskStore;

pub const MSG_INVALID_ID: &str = "Task id not valid";
pub const MSG_MISSING_FIELDS: &str = "Required fields are missing";
pub const MSG_NOT_FOUND: &str = "No task found..";
pub const MSG_ID_NOT_FOUND: &str = "Task with given id not found";
pub const MSG_FORBIDDEN_UPDATE: &str = "You can't update task of another user";
pub const MSG_FORBIDDEN_DELETE: &str = "You can't delete task of another user";

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Store error: {0}")]
    Store(DatabaseError),
}

impl From<DatabaseError> for TaskError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Validation(field_errors) => TaskError::Validation {
                message: "Task validation failed".to_string(),
                field_errors,
            },
            other => TaskError::Store(other),
        }
    }
}

/// Task operations on behalf of an authenticated caller
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, caller: Uuid) -> Result<Vec<Task>, TaskError> {
        let tasks = self.store.list_by_owner(caller).await?;
        debug!("Listed {} tasks for {}", tasks.len(), caller);
        Ok(tasks)
    }

    /// Owner-scoped lookup: another user's task is reported as not found.
    pub async fn get(&self, caller: Uuid, task_id: &str) -> Result<Task, TaskError> {
        let id = parse_task_id(task_id)?;
        self.store
            .find_owned(caller, id)
            .await?
            .ok_or_else(|| TaskError::NotFound(MSG_NOT_FOUND.to_string()))
    }

    /// Rejects only a body with no usable field at all; the store's schema
    /// check decides about partially filled bodies.
    pub async fn create(&self, caller: Uuid, fields: TaskFields) -> Result<Task, TaskError> {
        if !fields.any_present() {
            return Err(TaskError::InvalidArgument(MSG_MISSING_FIELDS.to_string()));
        }

        let task = self.store.insert(caller, &fields).await?;
        info!("Task {} created by {}", task.id, caller);
        Ok(task)
    }

    /// Full replace. Checks run in order: fields, id format, existence, ownership.
    pub async fn update(&self, caller: Uuid, task_id: &str, fields: TaskFields) -> Result<Task, TaskError> {
        let missing = fields.missing();
        if !missing.is_empty() {
            debug!("Update of {} rejected, missing {:?}", task_id, missing);
            return Err(TaskError::InvalidArgument(MSG_MISSING_FIELDS.to_string()));
        }

        let id = parse_task_id(task_id)?;
        self.authorize_owner(caller, id, MSG_FORBIDDEN_UPDATE).await?;

        let task = self
            .store
            .replace(id, &fields)
            .await?
            .ok_or_else(|| TaskError::NotFound(MSG_ID_NOT_FOUND.to_string()))?;
        info!("Task {} updated by {}", task.id, caller);
        Ok(task)
    }

    pub async fn delete(&self, caller: Uuid, task_id: &str) -> Result<(), TaskError> {
        let id = parse_task_id(task_id)?;
        self.authorize_owner(caller, id, MSG_FORBIDDEN_DELETE).await?;

        if !self.store.delete(id).await? {
            return Err(TaskError::NotFound(MSG_ID_NOT_FOUND.to_string()));
        }
        info!("Task {} deleted by {}", id, caller);
        Ok(())
    }

    /// Not scoped to the caller: matches tasks of every owner.
    pub async fn filtered(&self, params: &TaskFilterParams) -> Result<Vec<Task>, TaskError> {
        let criteria = TaskCriteria::from_params(params).map_err(|field_errors| TaskError::Validation {
            message: "Invalid filter".to_string(),
            field_errors,
        })?;
        if criteria.is_empty() {
            debug!("Filtered search without criteria");
        }
        let tasks = self.store.find_matching(&criteria).await?;
        debug!("Filter {:?} matched {} tasks", criteria, tasks.len());
        Ok(tasks)
    }

    pub async fn health_check(&self) -> Result<(), TaskError> {
        Ok(self.store.health_check().await?)
    }

    /// Existence is checked without owner scoping, so a foreign task
    /// yields Forbidden rather than NotFound.
    async fn authorize_owner(&self, caller: Uuid, id: Uuid, forbidden: &str) -> Result<Task, TaskError> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(MSG_ID_NOT_FOUND.to_string()))?;

        if task.user != caller {
            warn!("User {} denied access to task {} owned by {}", caller, id, task.user);
            return Err(TaskError::Forbidden(forbidden.to_string()));
        }
        Ok(task)
    }
}

fn parse_task_id(raw: &str) -> Result<Uuid, TaskError> {
    Uuid::parse_str(raw).map_err(|_| TaskError::InvalidArgument(MSG_INVALID_ID.to_string()))
}
