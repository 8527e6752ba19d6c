//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get all tasks
    async fn find_all(&self) -> Result<Vec<Task>>;

    /// Get a task by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// Save a task, assigning an id if it has none; otherwise overwrite
    /// the record with that id
    async fn save(&self, task: Task) -> Result<Task>;

    /// Save a batch of tasks
    async fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>>;

    /// Delete a task by id; silent no-op when the id is absent
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Find tasks owned by the given user (exact match)
    async fn find_by_user_name(&self, user_name: &str) -> Result<Vec<Task>>;
}
