use async_trait::async_trait;
use uuid::Uuid;

use super::task_models::{Task, TaskStatus};
use crate::error::Result;

/// Persistence contract for tasks. `save` is an upsert keyed on the
/// task id, so the service can construct and mutate `Task` values and
/// hand them to the store without caring whether the row exists yet.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, task_id: Uuid) -> Result<Option<Task>>;

    async fn save(&self, task: &Task) -> Result<Task>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete(&self, task_id: Uuid) -> Result<u64>;

    async fn find_all(&self) -> Result<Vec<Task>>;

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>>;

    async fn find_by_assignee(&self, assignee_id: Uuid) -> Result<Vec<Task>>;
}
