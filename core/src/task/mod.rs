//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod model;
mod repository;
mod service;

pub use file_store::FileTaskStore;
pub use model::Task;
pub use repository::TaskRepository;
pub use service::TaskService;
