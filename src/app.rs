//! Application wiring shared by the server binary and the integration tests.

use actix_cors::Cors;
use actix_web::{http::header, web};
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::routes;
use crate::store::Store;

/// Shared state handed to every handler and to `AuthMiddleware`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Registers state, extractor error handlers, routes and the 404 fallback.
///
/// Use as `App::new().configure(app::configure(state.clone()))`.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(path_config())
            .service(routes::health::health)
            .service(web::scope("/api/v1").configure(routes::config))
            .default_service(web::route().to(routes::not_found));
    }
}

/// CORS for the browser board: a single origin, with credentials so the session
/// cookie is sent.
pub fn cors(config: &Config) -> Cors {
    Cors::default()
        .allowed_origin(&config.cors_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}

/// Path segments are task ids; one that is not a UUID cannot name any task.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Task not found".into()).into())
}
