//! The Kanban board client.
//!
//! State flows explicitly: `load` produces a `BoardState`, and `dispatch` takes the
//! current state plus a `BoardCommand` and returns the next state. There is no
//! shared mutable board anywhere; the view layer (the `board` binary here) only
//! adapts user input into commands and renders whatever state it is handed.

pub mod card;
pub mod client;
pub mod command;
pub mod error;
pub mod form;
pub mod model;
pub mod render;
pub mod state;

pub use card::Card;
pub use client::ApiClient;
pub use command::{ApiCall, BoardCommand};
pub use error::ClientError;
pub use form::{parse_priority, parse_status, TaskForm};
pub use model::{normalize_priority, normalize_status, BoardTask, RawTask};
pub use state::{Board, BoardState, Column};

/// The result of a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: BoardState,
    /// Set when a request failed; the caller shows it to the user.
    pub alert: Option<String>,
}

/// Fetches the task list and lays out the board. A failure yields
/// `BoardState::Failed`, from which `BoardCommand::Refresh` retries.
pub async fn load(client: &ApiClient) -> BoardState {
    match client.list_tasks().await {
        Ok(tasks) => BoardState::Ready(Board::from_tasks(tasks)),
        Err(err) => {
            log::warn!("Failed to fetch tasks: {}", err);
            BoardState::Failed {
                message: err.message().to_string(),
            }
        }
    }
}

/// Plans `command` against `state` and runs the calls one at a time.
///
/// A failed mutation stops the sequence, keeps the prior state and returns the
/// server's message as an alert. There is no retry and no rollback. A failed
/// re-fetch after a successful mutation moves the board to `Failed`.
pub async fn dispatch(client: &ApiClient, state: BoardState, command: BoardCommand) -> Outcome {
    let calls = match command.plan(state.board()) {
        Ok(calls) => calls,
        Err(err) => {
            return Outcome {
                state,
                alert: Some(err.message().to_string()),
            }
        }
    };

    let mut next = state;
    for call in &calls {
        match client.execute(call).await {
            Ok(Some(tasks)) => next = BoardState::Ready(Board::from_tasks(tasks)),
            Ok(None) => {}
            Err(err) if *call == ApiCall::ListTasks => {
                log::warn!("Failed to fetch tasks: {}", err);
                next = BoardState::Failed {
                    message: err.message().to_string(),
                };
            }
            Err(err) => {
                log::warn!("Board request failed: {}", err);
                return Outcome {
                    state: next,
                    alert: Some(err.message().to_string()),
                };
            }
        }
    }
    Outcome {
        state: next,
        alert: None,
    }
}
