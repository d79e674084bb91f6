use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{task_not_found, user_exists_error, Store};
use crate::error::AppError;
use crate::models::{Task, User, UserRecord};

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    /// Insertion order, oldest first.
    tasks: Vec<Task>,
}

/// A process-local store. Uniqueness checks and inserts happen under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: UserRecord) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        let taken = inner
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(user_exists_error());
        }
        let public = user.to_user();
        inner.users.push(user);
        Ok(public)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).map(UserRecord::to_user))
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let mut inner = self.inner.write().await;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let inner = self.inner.read().await;
        // Reverse first so that equal timestamps still list the later insert first.
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_task(&self, task: Task) -> Result<Task, AppError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(task_not_found)?;
        *slot = task.clone();
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        Ok(inner.tasks.len() != before)
    }
}
