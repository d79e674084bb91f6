use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user as exposed to handlers and clients. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The stored form of a user, including the bcrypt hash. Only the login path reads it.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_has_no_password() {
        let record = UserRecord::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        let json = serde_json::to_value(record.to_user()).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json["createdAt"].is_string());
    }
}
