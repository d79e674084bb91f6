use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, sqlx::Type,
)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Human-readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Priority must be either low, medium, or high".to_string(),
                )
            })
    }
}

/// Represents the status of a task, which doubles as its board column.
/// Corresponds to the `task_status` SQL enum.
///
/// Any status may move to any other through an update; there is no terminal state.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, sqlx::Type,
)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "yetToStart")]
    #[sqlx(rename = "yetToStart")]
    YetToStart,
    #[serde(rename = "inprogress")]
    #[sqlx(rename = "inprogress")]
    InProgress,
    #[serde(rename = "completed")]
    #[sqlx(rename = "completed")]
    Completed,
}

impl TaskStatus {
    /// Column order on the board.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::YetToStart,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::YetToStart => "yetToStart",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::YetToStart => "Yet To Start",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Status must be either yetToStart, inprogress, or completed".to_string(),
                )
            })
    }
}

/// Request body for creating or updating a task.
///
/// Every field is optional at the wire level so that a missing title or description
/// surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "All fields are required."),
        length(
            min = 3,
            max = 100,
            message = "Title must be between 3 and 100 characters."
        )
    )]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "All fields are required."),
        length(
            min = 1,
            max = 500,
            message = "Description must be between 1 and 500 characters."
        )
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// A validated `TaskInput`: title and description are present and trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl TaskInput {
    /// Trims the text fields, validates them and returns the checked fields.
    pub fn into_fields(self) -> Result<TaskFields, AppError> {
        let input = TaskInput {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            ..self
        };
        input.validate()?;

        match (input.title, input.description) {
            (Some(title), Some(description)) => Ok(TaskFields {
                title,
                description,
                priority: input.priority,
                status: input.status,
            }),
            _ => Err(AppError::ValidationError(
                "All fields are required.".to_string(),
            )),
        }
    }
}

/// Represents a task as stored and as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// The owning user. Only the owner may read, modify or delete the task.
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `user_id`, defaulting priority to low and status
    /// to yet-to-start.
    pub fn new(fields: TaskFields, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            priority: fields.priority.unwrap_or_default(),
            status: fields.status.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title and description, and priority/status when given, then
    /// refreshes `updated_at`.
    pub fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        if let Some(priority) = fields.priority {
            self.priority = priority;
        }
        if let Some(status) = fields.status {
            self.status = status;
        }
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A user's tasks grouped into the three board columns.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksByStatus {
    #[serde(rename = "yetToStart")]
    pub yet_to_start: Vec<Task>,
    pub inprogress: Vec<Task>,
    pub completed: Vec<Task>,
}

impl TasksByStatus {
    pub fn group(tasks: Vec<Task>) -> Self {
        let mut grouped = TasksByStatus::default();
        for task in tasks {
            match task.status {
                TaskStatus::YetToStart => grouped.yet_to_start.push(task),
                TaskStatus::InProgress => grouped.inprogress.push(task),
                TaskStatus::Completed => grouped.completed.push(task),
            }
        }
        grouped
    }
}
