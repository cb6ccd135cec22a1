use crate::database::models::{wire_timestamp, Task};

use super::{ClientError, Credentials, TaskClient};

/// The caller's task list with a free-text filter over it
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: String,
    logged_in: bool,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the login state. The list is fetched once on each transition to
    /// logged in and dropped on logout. Returns whether a fetch happened.
    pub async fn auth_changed(
        &mut self,
        client: &TaskClient,
        creds: Option<&Credentials>,
    ) -> Result<bool, ClientError> {
        match (self.logged_in, creds) {
            (false, Some(creds)) => {
                self.refresh(client, creds).await?;
                self.logged_in = true;
                Ok(true)
            }
            (true, None) => {
                self.logged_in = false;
                self.tasks.clear();
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    pub async fn refresh(&mut self, client: &TaskClient, creds: &Credentials) -> Result<(), ClientError> {
        self.tasks = client.list(creds).await?;
        Ok(())
    }

    /// Delete then re-fetch; the local copy is never edited in place.
    pub async fn delete(
        &mut self,
        client: &TaskClient,
        creds: &Credentials,
        task_id: &str,
    ) -> Result<String, ClientError> {
        let msg = client.delete(creds, task_id).await?;
        self.refresh(client, creds).await?;
        Ok(msg)
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing the current filter, in fetch order
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter)
    }

    /// True when nothing passes the filter; front-ends show the "No tasks found" prompt
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| matches_filter(task, filter)).collect()
}

/// Case-insensitive substring match against any content field. Times are
/// matched in their wire form.
pub fn matches_filter(task: &Task, filter: &str) -> bool {
    let needle = filter.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        task.category.clone(),
        task.event_name.clone(),
        wire_timestamp(&task.start_time),
        wire_timestamp(&task.end_time),
        task.location.clone(),
        task.description.clone(),
    ]
    .iter()
    .any(|value| value.to_lowercase().contains(&needle))
}

/// Uppercased first character of the event name, for list avatars
pub fn avatar_initial(event_name: &str) -> String {
    event_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
