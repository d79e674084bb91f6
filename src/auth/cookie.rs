use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::config::Config;

/// Name of the httpOnly cookie that carries the session token.
pub const SESSION_COOKIE: &str = "taskboard_session";

/// Builds the session cookie for a freshly issued token.
///
/// Production deployments serve the client from another origin, which needs
/// `SameSite=None` and therefore `Secure`.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    let same_site = if config.production {
        SameSite::None
    } else {
        SameSite::Lax
    };
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(config.production)
        .same_site(same_site)
        .max_age(Duration::days(config.token_ttl_days))
        .finish()
}

/// A cookie that overwrites the session cookie with an empty, already expired one.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}
