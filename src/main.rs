use actix_web::{middleware::Logger, App, HttpServer};
use std::io;
use std::sync::Arc;

use taskboard::app::{self, AppState};
use taskboard::config::Config;
use taskboard::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(
            PgStore::connect(url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
        ),
        None => {
            log::warn!("DATABASE_URL is not set; using the in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let bind = (config.server_host.clone(), config.server_port);
    log::info!("Starting Taskboard server at {}", config.server_url());

    let state = AppState::new(store, config);
    HttpServer::new(move || {
        App::new()
            .wrap(app::cors(&state.config))
            .wrap(Logger::default())
            .configure(app::configure(state.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
