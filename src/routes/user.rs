use crate::{app::AppState, auth::AuthenticatedUser, error::AppError, models::TasksByStatus, tasks};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// The caller's profile and their tasks grouped by board column.
///
/// The task list is computed from the tasks' owner field, so it can never hold a
/// reference to a deleted task.
pub async fn user_details(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_tasks(state.store.as_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": "Successfully fetched user tasks",
        "user": user,
        "tasks": TasksByStatus::group(tasks)
    })))
}
