//! Server configuration, read from the process environment.
//!
//! `main` loads a `.env` file first (via `dotenv`), so every variable below can live
//! there during development.

use std::env;
use std::fmt;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    /// Production mode marks the session cookie `Secure` and `SameSite=None`.
    pub production: bool,
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    pub token_ttl_days: i64,
}

impl Config {
    /// Development defaults around the given signing secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: None,
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            jwt_secret: jwt_secret.into(),
            production: false,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, which keeps tests away from
    /// the shared process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut config = Config::new(jwt_secret);
        config.database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());
        if let Some(host) = lookup("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            config.server_port = parse("SERVER_PORT", port)?;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            config.cors_origin = origin;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost: u32 = parse("BCRYPT_COST", cost)?;
            if !(4..=31).contains(&cost) {
                return Err(ConfigError::Invalid {
                    key: "BCRYPT_COST",
                    value: cost.to_string(),
                });
            }
            config.bcrypt_cost = cost;
        }
        if let Some(days) = lookup("TOKEN_TTL_DAYS") {
            let days: i64 = parse("TOKEN_TTL_DAYS", days)?;
            if days <= 0 {
                return Err(ConfigError::Invalid {
                    key: "TOKEN_TTL_DAYS",
                    value: days.to_string(),
                });
            }
            config.token_ttl_days = days;
        }
        config.production = lookup("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(config)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
