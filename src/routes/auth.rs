use crate::{
    app::AppState,
    auth::{removal_cookie, service, session_cookie, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Responds `201 Created`. Missing fields, a short password or a taken
/// username/email all answer `400` with an `error` message.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    service::register(state.store.as_ref(), &state.config, register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": "User registered successfully"
    })))
}

/// Login user
///
/// On success sets the httpOnly session cookie and returns the user's profile.
/// Wrong credentials answer `400` without touching cookies.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (user, token) =
        service::login(state.store.as_ref(), &state.config, login_data.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, &state.config))
        .json(json!({
            "success": "User logged in successfully",
            "user": user
        })))
}

/// Logout user
///
/// Always succeeds and always clears the session cookie.
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.config))
        .json(json!({
            "success": "User logged out successfully"
        }))
}
