//! Registration and login, independent of the HTTP layer.
//!
//! bcrypt work runs on actix's blocking pool so it never stalls a worker.

use actix_web::web;
use validator::Validate;

use super::{generate_token, hash_password, verify_password, LoginRequest, RegisterRequest};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{User, UserRecord};
use crate::store::Store;

/// Creates an account with a hashed password.
///
/// Fails with `ValidationError` on missing or malformed fields and with `Conflict`
/// when the username or email is taken.
pub async fn register(
    store: &dyn Store,
    config: &Config,
    request: RegisterRequest,
) -> Result<User, AppError> {
    let request = RegisterRequest {
        username: request.username.map(|u| u.trim().to_string()),
        email: request.email.map(|e| e.trim().to_string()),
        password: request.password,
    };
    request.validate()?;

    let (username, email, password) = match (request.username, request.email, request.password)
    {
        (Some(username), Some(email), Some(password)) => (username, email, password),
        _ => return Err(AppError::ValidationError("All fields are required".into())),
    };

    let cost = config.bcrypt_cost;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    let user = store
        .insert_user(UserRecord::new(username, email, password_hash))
        .await?;
    log::info!("Registered user {} ({})", user.username, user.id);
    Ok(user)
}

/// Checks the credentials and issues a session token.
///
/// Unknown emails and wrong passwords fail identically with `InvalidCredentials`.
pub async fn login(
    store: &dyn Store,
    config: &Config,
    request: LoginRequest,
) -> Result<(User, String), AppError> {
    request.validate()?;
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) => (email.trim().to_string(), password),
        _ => return Err(AppError::ValidationError("All fields are required".into())),
    };

    let record = match store.find_user_by_email(&email).await? {
        Some(record) => record,
        None => {
            log::warn!("Login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    let hash = record.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &hash)).await??;
    if !matches {
        log::warn!("Login attempt with wrong password for user {}", record.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = generate_token(
        record.id,
        &record.email,
        &config.jwt_secret,
        config.token_ttl(),
    )?;
    log::info!("User {} logged in", record.id);
    Ok((record.to_user(), token))
}
