use crate::{app::AppState, auth::AuthenticatedUser, error::AppError, models::TaskInput, tasks};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Retrieves every task owned by the authenticated user.
///
/// Tasks are ordered by creation date, newest first.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [Task, ...]}`.
/// - `401 Unauthorized`: no valid session cookie.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_tasks(state.store.as_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: 3 to 100 characters (required).
/// - `description`: 1 to 500 characters (required).
/// - `priority` (optional): `low`, `medium` or `high`. Defaults to `low`.
/// - `status` (optional): `yetToStart`, `inprogress` or `completed`. Defaults to `yetToStart`.
///
/// ## Responses:
/// - `200 OK`: `{"success": ..., "task": Task}`.
/// - `400 Bad Request`: validation failure.
/// - `401 Unauthorized`: no valid session cookie.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks::create_task(state.store.as_ref(), &user, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": "Task added successfully.",
        "task": task
    })))
}

/// Retrieves a task by id.
///
/// ## Responses:
/// - `200 OK`: `{"task": Task}`.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task with this id.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks::get_task(state.store.as_ref(), &user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Updates a task the caller owns.
///
/// Title and description are required. Priority and status keep their stored
/// values when omitted. This is also how the board moves a card between columns.
///
/// ## Responses:
/// - `200 OK`: `{"success": ..., "task": Task}`.
/// - `400 Bad Request`: validation failure.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task with this id.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks::update_task(
        state.store.as_ref(),
        &user,
        task_id.into_inner(),
        task_data.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": "Task updated successfully.",
        "task": task
    })))
}

/// Deletes a task the caller owns.
///
/// ## Responses:
/// - `200 OK`: `{"success": ...}`.
/// - `403 Forbidden`: the task belongs to someone else.
/// - `404 Not Found`: no task with this id, including one already deleted.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    tasks::delete_task(state.store.as_ref(), &user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": "Task deleted successfully" })))
}
