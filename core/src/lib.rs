//! Core library for the task service
//!
//! This crate contains the domain logic, including:
//! - The Task model
//! - Task storage (repository trait and file-backed store)
//! - The task service layer

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
