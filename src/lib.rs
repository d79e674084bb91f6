#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Server side: domain models, session authentication, the task service, storage"]
#![doc = "backends, routing and error handling for the Taskboard API."]
#![doc = "Client side: the `board` module, which fetches a user's tasks, lays them out in"]
#![doc = "three status columns and turns board actions into API calls."]

pub mod app;
pub mod auth;
pub mod board;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;

pub use crate::app::AppState;
pub use crate::error::AppError;
