use crate::error::AppError;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a session JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// The user's id.
    pub sub: Uuid,
    pub email: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

/// Signs a session token for the given user that expires after `ttl`.
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl: chrono::Duration,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::InternalServerError("Token lifetime overflows".into()))?;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies the signature and expiry of a session token and returns its claims.
///
/// Expired tokens produce `Unauthorized("Token expired")`; any other defect produces
/// `Unauthorized("Invalid token")`.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::warn!("Rejected session token: {}", e);
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
            _ => AppError::Unauthorized("Invalid token".into()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_for_tokens";

    #[test]
    fn test_token_generation_and_verification() {
        let user_id = Uuid::new_v4();
        let token =
            generate_token(user_id, "a@x.com", SECRET, chrono::Duration::days(30)).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.com".into(),
            iat: (now - chrono::Duration::days(31)).timestamp(),
            exp: (now - chrono::Duration::hours(2)).timestamp(),
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_token(&expired_token, SECRET).unwrap_err(),
            AppError::Unauthorized("Token expired".into())
        );
    }

    #[test]
    fn test_invalid_token_signature() {
        let token =
            generate_token(Uuid::new_v4(), "a@x.com", "some_other_secret", chrono::Duration::days(1))
                .unwrap();

        assert_eq!(
            verify_token(&token, SECRET).unwrap_err(),
            AppError::Unauthorized("Invalid token".into())
        );
        assert_eq!(
            verify_token("not-a-jwt", SECRET).unwrap_err(),
            AppError::Unauthorized("Invalid token".into())
        );
    }
}
