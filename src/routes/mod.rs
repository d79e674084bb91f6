pub mod auth;
pub mod health;
pub mod tasks;
pub mod user;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Routes under `/api/v1`. Registration, login and logout are public; everything
/// else requires a session.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(
            web::resource("/userDetails")
                .wrap(AuthMiddleware)
                .route(web::get().to(user::user_details)),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound("Route not found".into()))
}
