pub mod cookie;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use cookie::{removal_cookie, session_cookie, SESSION_COOKIE};
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "All fields are required"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "All fields are required"))]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 3 to 32 characters: letters, digits, underscores or hyphens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "All fields are required"),
        length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "All fields are required"),
        email(message = "Email must be a valid email address")
    )]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "All fields are required"),
        length(min = 6, message = "Password must be at least 6 characters long")
    )]
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use validator::Validate;

    fn message(request: &impl Validate) -> String {
        let err: AppError = request.validate().unwrap_err().into();
        err.public_message().to_string()
    }

    #[test]
    fn test_login_request_validation() {
        assert!(LoginRequest::new("test@example.com", "password123")
            .validate()
            .is_ok());

        let missing_password = LoginRequest {
            email: Some("test@example.com".into()),
            password: None,
        };
        assert_eq!(message(&missing_password), "All fields are required");
    }

    #[test]
    fn test_register_request_validation() {
        assert!(RegisterRequest::new("test_user-123", "test@example.com", "secret1")
            .validate()
            .is_ok());

        let cases = [
            (
                RegisterRequest::new("test user!", "test@example.com", "secret1"),
                "Username must be alphanumeric, underscores, or hyphens",
            ),
            (
                RegisterRequest::new("tu", "test@example.com", "secret1"),
                "Username must be between 3 and 32 characters",
            ),
            (
                RegisterRequest::new("alice", "not-an-email", "secret1"),
                "Email must be a valid email address",
            ),
            (
                RegisterRequest::new("alice", "a@x.com", "12345"),
                "Password must be at least 6 characters long",
            ),
            (
                RegisterRequest {
                    username: Some("alice".into()),
                    ..RegisterRequest::default()
                },
                "All fields are required",
            ),
        ];
        for (request, expected) in cases {
            assert_eq!(message(&request), expected);
        }
    }
}
