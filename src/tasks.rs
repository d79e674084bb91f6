//! Task operations scoped to an owning user.
//!
//! Every operation on an existing task first loads it and checks ownership, so an
//! unknown id is always `NotFound` and a foreign task is always `Forbidden`.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskInput, User};
use crate::store::{task_not_found, Store};

pub async fn create_task(store: &dyn Store, owner: &User, input: TaskInput) -> Result<Task, AppError> {
    let fields = input.into_fields()?;
    let task = store.insert_task(Task::new(fields, owner.id)).await?;
    log::info!("User {} created task {}", owner.id, task.id);
    Ok(task)
}

pub async fn list_tasks(store: &dyn Store, owner: &User) -> Result<Vec<Task>, AppError> {
    store.tasks_for_user(owner.id).await
}

pub async fn get_task(store: &dyn Store, owner: &User, id: Uuid) -> Result<Task, AppError> {
    let task = store.find_task(id).await?.ok_or_else(task_not_found)?;
    if !task.is_owned_by(owner.id) {
        log::warn!("User {} denied access to task {}", owner.id, id);
        return Err(AppError::Forbidden("Forbidden".into()));
    }
    Ok(task)
}

/// Replaces title and description (both required) and, when present, priority
/// and status. Any status may move to any other.
pub async fn update_task(
    store: &dyn Store,
    owner: &User,
    id: Uuid,
    input: TaskInput,
) -> Result<Task, AppError> {
    let fields = input.into_fields()?;
    let mut task = get_task(store, owner, id).await?;
    task.apply(fields);
    let task = store.update_task(task).await?;
    log::info!("User {} updated task {} (status {})", owner.id, task.id, task.status);
    Ok(task)
}

pub async fn delete_task(store: &dyn Store, owner: &User, id: Uuid) -> Result<(), AppError> {
    get_task(store, owner, id).await?;
    if !store.delete_task(id).await? {
        return Err(task_not_found());
    }
    log::info!("User {} deleted task {}", owner.id, id);
    Ok(())
}
