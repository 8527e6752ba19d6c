//! Task service layer
//!
//! Orchestrates business rules on top of the repository: existence checks,
//! full-replace vs partial-update semantics, and status/owner filtering.

use std::sync::Arc;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// Service wrapping a [`TaskRepository`]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

/// Present and non-empty, the merge rule for PATCH fields
fn has_length(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|s| !s.is_empty())
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Save the given task
    pub async fn save_task(&self, task: Task) -> Result<Task> {
        tracing::debug!(?task, "saving task");
        self.repository.save(task).await
    }

    /// Save a batch of tasks
    pub async fn save_tasks(&self, tasks: Vec<Task>) -> Result<Vec<Task>> {
        self.repository.save_all(tasks).await
    }

    /// Retrieve all tasks
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        self.repository.find_all().await
    }

    /// Find a task by id, failing when it does not exist
    pub async fn find_task_by_id(&self, id: i64) -> Result<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(Error::TaskNotFound(id))
    }

    /// Delete a task by id, unconditionally; reports success even when the
    /// id was absent
    pub async fn delete_task_by_id(&self, id: i64) -> Result<String> {
        self.repository.delete_by_id(id).await?;
        Ok(format!("{id} id -> task removed."))
    }

    /// Full-replace update. When the id is absent the incoming task is first
    /// persisted as a brand-new record instead of reporting not-found; all
    /// four mutable fields are then overwritten with the incoming values.
    pub async fn update_task(&self, id: i64, task: Task) -> Result<Task> {
        let existing = match self.repository.find_by_id(id).await? {
            Some(existing) => existing,
            None => self.repository.save(task.clone()).await?,
        };

        let updated = Task {
            id: existing.id,
            user_name: task.user_name,
            task_name: task.task_name,
            task_description: task.task_description,
            task_status: task.task_status,
        };
        self.repository.save(updated).await
    }

    /// Partial update. Fails when the id is absent; each field overwrites
    /// the stored value only when the incoming value is present and
    /// non-empty.
    pub async fn patch_task(&self, id: i64, task: Task) -> Result<Task> {
        let mut updated = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(Error::TaskNotFound(id))?;

        if has_length(&task.user_name) {
            updated.user_name = task.user_name;
        }
        if has_length(&task.task_name) {
            updated.task_name = task.task_name;
        }
        if has_length(&task.task_description) {
            updated.task_description = task.task_description;
        }
        if has_length(&task.task_status) {
            updated.task_status = task.task_status;
        }
        self.repository.save(updated).await
    }

    /// Search tasks by exact status match. Full scan then filter; the store
    /// keeps no status index.
    pub async fn search_by_task_status(&self, status: &str) -> Result<Vec<Task>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| t.task_status.as_deref() == Some(status))
            .collect())
    }

    /// Search tasks owned by the given user
    pub async fn search_by_user_name(&self, user_name: &str) -> Result<Vec<Task>> {
        self.repository.find_by_user_name(user_name).await
    }
}
