//! Task model definitions

use serde::{Deserialize, Serialize};

/// A unit of work with a name, description, status and owning user.
///
/// `id` is assigned by the store on first save and is `None` on inbound
/// create payloads. `task_status` is an opaque label compared by string
/// equality only; there is no enforced enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: Option<i64>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub task_status: Option<String>,
    pub user_name: Option<String>,
}

impl Task {
    /// Create a new task with the given name, without an id
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: Some(task_name.into()),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.task_status = Some(status.into());
        self
    }

    /// Set the owning user
    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}
