use super::error::ClientError;
use super::model::BoardTask;
use crate::models::{TaskInput, TaskPriority, TaskStatus};

/// The add/edit task form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl TaskForm {
    /// A form pre-filled from an existing task, for editing.
    pub fn from_task(task: &BoardTask) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
        }
    }

    /// Required-field checks run before anything is sent.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Form("Title is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::Form("Description is required".into()));
        }
        Ok(())
    }

    /// The full create payload.
    pub fn to_input(&self) -> Result<TaskInput, ClientError> {
        self.validate()?;
        Ok(TaskInput {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            priority: Some(self.priority),
            status: Some(self.status),
        })
    }

    /// An edit payload holding only what changed relative to `original`.
    ///
    /// Title and description are always included because the server requires them.
    pub fn diff(&self, original: &BoardTask) -> Result<TaskInput, ClientError> {
        let mut input = self.to_input()?;
        if self.priority == original.priority {
            input.priority = None;
        }
        if self.status == original.status {
            input.status = None;
        }
        Ok(input)
    }
}

/// Reads a priority typed by the user. Only the three wire names are accepted,
/// ignoring case.
pub fn parse_priority(input: &str) -> Result<TaskPriority, ClientError> {
    let input = input.trim();
    TaskPriority::ALL
        .into_iter()
        .find(|p| p.as_str().eq_ignore_ascii_case(input))
        .ok_or_else(|| {
            ClientError::Form(format!(
                "Unknown priority {:?}; expected low, medium or high",
                input
            ))
        })
}

/// Reads a status typed by the user. Only the three wire names are accepted,
/// ignoring case; a near miss is an error, never a different column.
pub fn parse_status(input: &str) -> Result<TaskStatus, ClientError> {
    let input = input.trim();
    TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(input))
        .ok_or_else(|| {
            ClientError::Form(format!(
                "Unknown status {:?}; expected yetToStart, inprogress or completed",
                input
            ))
        })
}
