//! Terminal client for the task board.
//!
//! Each invocation logs in with the given credentials, runs one command and prints
//! the resulting board.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use taskboard::auth::RegisterRequest;
use taskboard::board::{
    self, parse_priority, parse_status, render::render_state, ApiClient, BoardCommand,
    BoardState, ClientError, TaskForm,
};
use taskboard::models::{TaskPriority, TaskStatus};

#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(author, version, about = "Kanban board for Taskboard", long_about = None)]
struct Cli {
    /// API root
    #[arg(long, env = "BOARD_URL", default_value = "http://127.0.0.1:5000/api/v1")]
    url: String,

    #[arg(long, env = "BOARD_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "BOARD_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    #[command(flatten)]
    Board(BoardAction),
}

/// Commands that need a session.
#[derive(Subcommand, Debug)]
enum BoardAction {
    /// Print the board
    Show,
    /// Add a task
    Add {
        title: String,
        description: String,
        /// low, medium or high
        #[arg(long, default_value = "low", value_parser = parse_priority)]
        priority: TaskPriority,
        /// yetToStart, inprogress or completed
        #[arg(long, default_value = "yetToStart", value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Edit a task; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
    },
    /// Move a task to another column
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Delete a task
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let client = ApiClient::new(&cli.url)?;
    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            client
                .register(&RegisterRequest::new(&username, email, password))
                .await?;
            println!("Registered {}", username);
            Ok(())
        }
        Command::Board(action) => {
            let (email, password) = match (cli.email, cli.password) {
                (Some(email), Some(password)) => (email, password),
                _ => {
                    return Err(ClientError::Form(
                        "--email and --password (or BOARD_EMAIL and BOARD_PASSWORD) are required"
                            .into(),
                    ))
                }
            };
            client.login(&email, &password).await?;
            run_action(&client, action).await
        }
    }
}

async fn run_action(client: &ApiClient, action: BoardAction) -> Result<(), ClientError> {
    let state = board::load(client).await;
    let command = match action {
        BoardAction::Show => BoardCommand::Refresh,
        BoardAction::Add {
            title,
            description,
            priority,
            status,
        } => BoardCommand::Create(TaskForm {
            title,
            description,
            priority,
            status,
        }),
        BoardAction::Edit {
            id,
            title,
            description,
            priority,
            status,
        } => {
            let current = state
                .board()
                .and_then(|b| b.find(&id))
                .ok_or_else(|| ClientError::Form(format!("No task with id {}", id)))?;
            let mut form = TaskForm::from_task(current);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(priority) = priority {
                form.priority = priority;
            }
            if let Some(status) = status {
                form.status = status;
            }
            BoardCommand::Edit { id, form }
        }
        BoardAction::Move { id, status } => BoardCommand::Move { id, to: status },
        BoardAction::Delete { id } => BoardCommand::Delete { id },
    };

    let outcome = board::dispatch(client, state, command).await;
    print!("{}", render_state(&outcome.state, chrono::Utc::now()));
    match outcome.alert {
        Some(alert) => Err(ClientError::Form(alert)),
        None if matches!(outcome.state, BoardState::Failed { .. }) => Err(ClientError::Form(
            "Failed to load tasks; run the command again to retry".into(),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_parses_canonical_status() {
        let cli = Cli::try_parse_from(["board", "move", "t1", "inprogress"]).unwrap();
        match cli.command {
            Command::Board(BoardAction::Move { id, status }) => {
                assert_eq!(id, "t1");
                assert_eq!(status, TaskStatus::InProgress);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_misspelled_values_are_rejected() {
        assert!(Cli::try_parse_from(["board", "move", "t1", "in-progres"]).is_err());
        assert!(Cli::try_parse_from(["board", "add", "Title", "Desc", "--priority", "hihg"]).is_err());
        assert!(Cli::try_parse_from(["board", "edit", "t1", "--status", "done"]).is_err());
    }

    #[test]
    fn test_add_defaults() {
        let cli = Cli::try_parse_from(["board", "add", "Buy milk", "2%"]).unwrap();
        match cli.command {
            Command::Board(BoardAction::Add {
                priority, status, ..
            }) => {
                assert_eq!(priority, TaskPriority::Low);
                assert_eq!(status, TaskStatus::YetToStart);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_register_needs_no_session() {
        let cli = Cli::try_parse_from(["board", "register", "alice", "a@x.com", "secret1"]).unwrap();
        assert!(matches!(cli.command, Command::Register { .. }));
    }
}
