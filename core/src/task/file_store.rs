//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk, with an in-memory cache and an
//! auto-incrementing id counter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskRepository;
use crate::Result;

struct StoreInner {
    tasks: HashMap<i64, Task>,
    next_id: i64,
}

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks plus the id counter
    inner: RwLock<StoreInner>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks: HashMap<i64, Task> = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks
                .into_iter()
                .filter_map(|t| t.id.map(|id| (id, t)))
                .collect()
        } else {
            HashMap::new()
        };

        let next_id = tasks.keys().max().copied().unwrap_or(0) + 1;

        Ok(Self {
            path,
            inner: RwLock::new(StoreInner { tasks, next_id }),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<&Task> = inner.tasks.values().collect();
        tasks.sort_by_key(|t| t.id);
        let content = serde_json::to_string_pretty(&tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

impl StoreInner {
    /// Insert a task, assigning the next id when it has none. Explicit ids
    /// at or past the counter bump it so ids never collide.
    fn insert(&mut self, mut task: Task) -> Task {
        let id = match task.id {
            Some(id) => {
                if id >= self.next_id {
                    self.next_id = id + 1;
                }
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };
        task.id = Some(id);
        self.tasks.insert(id, task.clone());
        task
    }
}

fn sorted_by_id(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|t| t.id);
    tasks
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn find_all(&self) -> Result<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(sorted_by_id(inner.tasks.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn save(&self, task: Task) -> Result<Task> {
        let saved = {
            let mut inner = self.inner.write().await;
            inner.insert(task)
        };
        self.persist().await?;
        Ok(saved)
    }

    async fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>> {
        let saved = {
            let mut inner = self.inner.write().await;
            tasks.into_iter().map(|t| inner.insert(t)).collect()
        };
        self.persist().await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let removed = {
            let mut inner = self.inner.write().await;
            inner.tasks.remove(&id).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Vec<Task>> {
        let inner = self.inner.read().await;
        let tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.user_name.as_deref() == Some(user_name))
            .cloned()
            .collect();
        Ok(sorted_by_id(tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let store = FileTaskStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let (store, _temp) = create_test_store().await;

        let task = Task::new("Test task").with_description("A test description");
        let saved = store.save(task).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.task_name, Some("Test task".to_string()));
        assert_eq!(
            saved.task_description,
            Some("A test description".to_string())
        );
    }

    #[tokio::test]
    async fn test_ids_auto_increment() {
        let (store, _temp) = create_test_store().await;

        let first = store.save(Task::new("Task 1")).await.unwrap();
        let second = store.save(Task::new("Task 2")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let (store, _temp) = create_test_store().await;

        let saved = store.save(Task::new("Original")).await.unwrap();
        let id = saved.id.unwrap();

        let mut updated = saved.clone();
        updated.task_name = Some("Updated".to_string());
        store.save(updated).await.unwrap();

        let retrieved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(retrieved.task_name, Some("Updated".to_string()));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let (store, _temp) = create_test_store().await;
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted() {
        let (store, _temp) = create_test_store().await;

        store.save(Task::new("Task 1")).await.unwrap();
        store.save(Task::new("Task 2")).await.unwrap();
        store.save(Task::new("Task 3")).await.unwrap();

        let tasks = store.find_all().await.unwrap();
        assert_eq!(tasks.len(), 3);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_all() {
        let (store, _temp) = create_test_store().await;

        let saved = store
            .save_all(vec![Task::new("Task 1"), Task::new("Task 2")])
            .await
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved.iter().all(|t| t.id.is_some()));
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (store, _temp) = create_test_store().await;

        let saved = store.save(Task::new("Task to delete")).await.unwrap();
        let id = saved.id.unwrap();

        store.delete_by_id(id).await.unwrap();
        assert!(store.find_by_id(id).await.unwrap().is_none());

        // Deleting again is a silent no-op
        store.delete_by_id(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_user_name() {
        let (store, _temp) = create_test_store().await;

        store
            .save(Task::new("Task 1").with_user("ABC"))
            .await
            .unwrap();
        store
            .save(Task::new("Task 2").with_user("ABC"))
            .await
            .unwrap();
        store
            .save(Task::new("Task 3").with_user("XYZ"))
            .await
            .unwrap();

        let abc_tasks = store.find_by_user_name("ABC").await.unwrap();
        assert_eq!(abc_tasks.len(), 2);

        let none = store.find_by_user_name("NOBODY").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let task_id;

        // Create store and add a task
        {
            let store = FileTaskStore::new(&path).await.unwrap();
            let saved = store
                .save(
                    Task::new("Persistent task")
                        .with_description("Should survive reload")
                        .with_status("In Progress"),
                )
                .await
                .unwrap();
            task_id = saved.id.unwrap();
        }

        // Create a new store instance and verify data persisted
        {
            let store = FileTaskStore::new(&path).await.unwrap();
            let task = store.find_by_id(task_id).await.unwrap().unwrap();
            assert_eq!(task.task_name, Some("Persistent task".to_string()));
            assert_eq!(
                task.task_description,
                Some("Should survive reload".to_string())
            );
            assert_eq!(task.task_status, Some("In Progress".to_string()));

            // The id counter resumes past the loaded records
            let next = store.save(Task::new("Another")).await.unwrap();
            assert_eq!(next.id, Some(task_id + 1));
        }
    }
}
