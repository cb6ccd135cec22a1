use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskCriteria, TaskFields};
use crate::database::store::TaskStore;

/// Process-local store. Keeps insertion order; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| t.user == owner).cloned().collect())
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id && t.user == owner).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, owner: Uuid, fields: &TaskFields) -> Result<Task, DatabaseError> {
        let content = fields.validate().map_err(DatabaseError::Validation)?;
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user: owner,
            event_name: content.event_name,
            start_time: content.start_time,
            end_time: content.end_time,
            location: content.location,
            description: content.description,
            category: content.category,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn replace(&self, id: Uuid, fields: &TaskFields) -> Result<Option<Task>, DatabaseError> {
        let content = fields.validate().map_err(DatabaseError::Validation)?;
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.event_name = content.event_name;
        task.start_time = content.start_time;
        task.end_time = content.end_time;
        task.location = content.location;
        task.description = content.description;
        task.category = content.category;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() != before)
    }

    async fn find_matching(&self, criteria: &TaskCriteria) -> Result<Vec<Task>, DatabaseError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| criteria.matches(t)).cloned().collect())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
