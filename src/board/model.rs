//! Client-side task model.
//!
//! The server's JSON is read leniently into `RawTask` and then normalized into
//! `BoardTask`, so casing drift in `status`/`priority` or missing optional fields
//! never break the board.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{TaskPriority, TaskStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A task as the board shows it: canonical enums and no missing text.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub user: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RawTask> for BoardTask {
    fn from(raw: RawTask) -> Self {
        BoardTask {
            id: raw.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: raw
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled Task".to_string()),
            description: raw.description.unwrap_or_default(),
            priority: normalize_priority(raw.priority.as_deref()),
            status: normalize_status(raw.status.as_deref()),
            user: raw.user,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

/// Maps any casing or spacing of a status onto the canonical value.
///
/// Anything that is neither "yet to start" nor "in progress" lands in completed.
pub fn normalize_status(raw: Option<&str>) -> TaskStatus {
    let key: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    match key.as_str() {
        "yettostart" => TaskStatus::YetToStart,
        "inprogress" => TaskStatus::InProgress,
        _ => TaskStatus::Completed,
    }
}

/// Lower-cases and trims a priority; unknown or missing values fall back to low.
pub fn normalize_priority(raw: Option<&str>) -> TaskPriority {
    match raw.unwrap_or_default().trim().to_lowercase().as_str() {
        "high" => TaskPriority::High,
        "medium" => TaskPriority::Medium,
        _ => TaskPriority::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_status() {
        for raw in ["yetToStart", "yettostart", "Yet To Start", "yet_to_start"] {
            assert_eq!(normalize_status(Some(raw)), TaskStatus::YetToStart, "{}", raw);
        }
        for raw in ["inprogress", "inProgress", "In Progress"] {
            assert_eq!(normalize_status(Some(raw)), TaskStatus::InProgress, "{}", raw);
        }
        for raw in ["completed", "Done", ""] {
            assert_eq!(normalize_status(Some(raw)), TaskStatus::Completed, "{}", raw);
        }
        assert_eq!(normalize_status(None), TaskStatus::Completed);
    }

    #[test]
    fn test_normalize_priority() {
        assert_eq!(normalize_priority(Some(" HIGH ")), TaskPriority::High);
        assert_eq!(normalize_priority(Some("Medium")), TaskPriority::Medium);
        assert_eq!(normalize_priority(Some("urgent")), TaskPriority::Low);
        assert_eq!(normalize_priority(None), TaskPriority::Low);
    }

    #[test]
    fn test_raw_task_normalization() {
        let raw: RawTask = serde_json::from_str(
            r#"{"_id":"abc","description":"d","priority":"High","status":"InProgress"}"#,
        )
        .unwrap();
        let task = BoardTask::from(raw);

        assert_eq!(
            task,
            BoardTask {
                id: "abc".into(),
                title: "Untitled Task".into(),
                description: "d".into(),
                priority: TaskPriority::High,
                status: TaskStatus::InProgress,
                user: None,
                created_at: None,
                updated_at: None,
            }
        );
    }
}
