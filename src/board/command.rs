//! Board actions as plain data.
//!
//! A `BoardCommand` is planned against the current board into the `ApiCall`s it
//! needs. Planning has no side effects; `ApiClient::execute` performs the calls.
//! Every mutating plan ends with `ListTasks` so the board is rebuilt from the
//! server instead of patched locally.

use super::error::ClientError;
use super::form::TaskForm;
use super::state::Board;
use crate::models::{TaskInput, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    /// Fetch the task list again (initial load and "Retry").
    Refresh,
    Create(TaskForm),
    Edit { id: String, form: TaskForm },
    /// A card dropped onto a column.
    Move { id: String, to: TaskStatus },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListTasks,
    CreateTask(TaskInput),
    UpdateTask { id: String, input: TaskInput },
    DeleteTask { id: String },
}

impl BoardCommand {
    /// The calls this command needs, in order.
    ///
    /// Commands that target a task the board does not show plan nothing, and so
    /// does dropping a card back onto its own column. Form problems are reported
    /// before any call is planned.
    pub fn plan(&self, board: Option<&Board>) -> Result<Vec<ApiCall>, ClientError> {
        let find = |id: &str| board.and_then(|b| b.find(id));

        let calls = match self {
            BoardCommand::Refresh => vec![ApiCall::ListTasks],
            BoardCommand::Create(form) => {
                vec![ApiCall::CreateTask(form.to_input()?), ApiCall::ListTasks]
            }
            BoardCommand::Edit { id, form } => match find(id.as_str()) {
                Some(original) => vec![
                    ApiCall::UpdateTask {
                        id: id.clone(),
                        input: form.diff(original)?,
                    },
                    ApiCall::ListTasks,
                ],
                None => Vec::new(),
            },
            BoardCommand::Move { id, to } => match find(id.as_str()) {
                Some(task) if task.status != *to => {
                    // The server validates title and description on every update.
                    let input = TaskInput {
                        title: Some(task.title.clone()),
                        description: Some(task.description.clone()),
                        priority: Some(task.priority),
                        status: Some(*to),
                    };
                    vec![
                        ApiCall::UpdateTask {
                            id: id.clone(),
                            input,
                        },
                        ApiCall::ListTasks,
                    ]
                }
                _ => Vec::new(),
            },
            BoardCommand::Delete { id } => match find(id.as_str()) {
                Some(_) => vec![ApiCall::DeleteTask { id: id.clone() }, ApiCall::ListTasks],
                None => Vec::new(),
            },
        };
        Ok(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::BoardTask;
    use crate::models::TaskPriority;
    use pretty_assertions::assert_eq;

    fn board() -> Board {
        Board::from_tasks(vec![BoardTask {
            id: "t1".into(),
            title: "Buy milk".into(),
            description: "2%".into(),
            priority: TaskPriority::Medium,
            status: TaskStatus::YetToStart,
            user: None,
            created_at: None,
            updated_at: None,
        }])
    }

    #[test]
    fn test_move_sends_full_payload_then_refetches() {
        let command = BoardCommand::Move {
            id: "t1".into(),
            to: TaskStatus::Completed,
        };
        assert_eq!(
            command.plan(Some(&board())).unwrap(),
            vec![
                ApiCall::UpdateTask {
                    id: "t1".into(),
                    input: TaskInput {
                        title: Some("Buy milk".into()),
                        description: Some("2%".into()),
                        priority: Some(TaskPriority::Medium),
                        status: Some(TaskStatus::Completed),
                    },
                },
                ApiCall::ListTasks,
            ]
        );
    }

    #[test]
    fn test_noop_moves() {
        let same_column = BoardCommand::Move {
            id: "t1".into(),
            to: TaskStatus::YetToStart,
        };
        assert!(same_column.plan(Some(&board())).unwrap().is_empty());

        let unknown = BoardCommand::Move {
            id: "nope".into(),
            to: TaskStatus::Completed,
        };
        assert!(unknown.plan(Some(&board())).unwrap().is_empty());
        assert!(unknown.plan(None).unwrap().is_empty());
    }

    #[test]
    fn test_create_requires_valid_form() {
        let err = BoardCommand::Create(TaskForm::default())
            .plan(None)
            .unwrap_err();
        assert_eq!(err, ClientError::Form("Title is required".into()));
    }

    #[test]
    fn test_delete_and_refresh() {
        assert_eq!(
            BoardCommand::Delete { id: "t1".into() }
                .plan(Some(&board()))
                .unwrap(),
            vec![ApiCall::DeleteTask { id: "t1".into() }, ApiCall::ListTasks]
        );
        assert_eq!(
            BoardCommand::Refresh.plan(None).unwrap(),
            vec![ApiCall::ListTasks]
        );
    }
}
