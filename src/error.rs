//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the server.
//! Every failure a handler can produce is one of its variants, and each variant knows
//! which HTTP status it maps to.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers simply return
//! `Result<_, AppError>` and the framework renders a JSON body of the form
//! `{"error": "<message>"}`. Internal failures never leak their detail to the client:
//! the detail is logged and the body carries a generic message instead.
//!
//! `From` conversions exist for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` so that `?` works everywhere.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Missing or malformed input that failed validation (HTTP 400).
    ValidationError(String),
    /// A request body that could not be parsed at all (HTTP 400).
    BadRequest(String),
    /// A unique field (username or email) is already taken (HTTP 400).
    Conflict(String),
    /// Login with an unknown email or a wrong password (HTTP 400).
    InvalidCredentials,
    /// Missing, invalid or expired session (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but the caller does not own the resource (HTTP 403).
    Forbidden(String),
    /// The requested resource or route does not exist (HTTP 404).
    NotFound(String),
    /// An unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// A failure reported by the storage layer (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    /// The message sent to the client in the `error` field.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg,
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                INTERNAL_ERROR_MESSAGE
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({
            "error": self.public_message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Unique-constraint violations become `AppError::Conflict`; everything else is a
/// database failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("User already exists!".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into a single client-facing message.
///
/// A missing field always wins, so clients see "All fields are required" before any
/// length or format complaint. Otherwise the first failing field in alphabetical
/// order is reported.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut failures: Vec<(&str, &validator::ValidationError)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
            .collect();
        failures.sort_by_key(|(field, e)| (e.code != "required", *field));

        let message = failures
            .first()
            .map(|(field, e)| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::ValidationError(message)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(error: actix_web::error::BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
