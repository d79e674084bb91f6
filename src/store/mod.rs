//! Persistence for users and tasks.
//!
//! Handlers only see the `Store` trait. `PgStore` is the production backend;
//! `MemoryStore` serves development runs without a database and the test suite.
//!
//! A user's task list is never stored. It is always derived by querying tasks by
//! owner, so creating or deleting a task is a single write.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User, UserRecord};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Fails with `AppError::Conflict` when the username or the
    /// email is already registered.
    async fn insert_user(&self, user: UserRecord) -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// All tasks owned by `user_id`, newest first.
    async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError>;

    /// Persists every mutable field of `task`. Fails with `AppError::NotFound` if the
    /// task no longer exists.
    async fn update_task(&self, task: Task) -> Result<Task, AppError>;

    /// Returns whether a task was removed.
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;
}

pub(crate) fn user_exists_error() -> AppError {
    AppError::Conflict("User already exists!".to_string())
}

pub(crate) fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}
