use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskCriteria, TaskFields};

/// Persistence boundary for tasks.
///
/// Implementations validate field presence and types on every write
/// (`TaskFields::validate`), generate ids and timestamps, and perform each
/// mutation as a single write.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `owner`
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError>;

    /// Task with `id` only if it belongs to `owner`
    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, DatabaseError>;

    /// Task with `id` regardless of owner
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, DatabaseError>;

    async fn insert(&self, owner: Uuid, fields: &TaskFields) -> Result<Task, DatabaseError>;

    /// Replace the six content fields. `None` if the task no longer exists.
    async fn replace(&self, id: Uuid, fields: &TaskFields) -> Result<Option<Task>, DatabaseError>;

    /// `true` if a task was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Tasks of every owner matching `criteria`
    async fn find_matching(&self, criteria: &TaskCriteria) -> Result<Vec<Task>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
