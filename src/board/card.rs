use chrono::{DateTime, Utc};

use super::model::BoardTask;

/// Descriptions longer than this are cut on the card.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// The rendered contents of one task card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority_badge: &'static str,
    pub status_badge: &'static str,
    pub created: Option<String>,
    pub updated: Option<String>,
    /// Updated within the last 24 hours.
    pub recently_updated: bool,
}

impl Card {
    pub fn new(task: &BoardTask, now: DateTime<Utc>) -> Self {
        Card {
            id: task.id.clone(),
            title: task.title.clone(),
            description: truncate(&task.description, DESCRIPTION_PREVIEW_CHARS),
            priority_badge: task.priority.label(),
            status_badge: task.status.label(),
            created: task.created_at.map(|t| relative_time(t, now)),
            updated: task.updated_at.map(|t| relative_time(t, now)),
            recently_updated: task
                .updated_at
                .map(|t| now.signed_duration_since(t) < chrono::Duration::hours(24))
                .unwrap_or(false),
        }
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// "just now", "5 minutes ago", "3 hours ago", "2 days ago" and so on.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let (value, unit) = match seconds {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 2_592_000 => (s / 86_400, "day"),
        s if s < 31_536_000 => (s / 2_592_000, "month"),
        s => (s / 31_536_000, "year"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{} {}{} ago", value, unit, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};
    use chrono::Duration;

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        let cases = [
            (Duration::seconds(5), "just now"),
            (Duration::seconds(-30), "just now"),
            (Duration::minutes(1), "1 minute ago"),
            (Duration::minutes(45), "45 minutes ago"),
            (Duration::hours(3), "3 hours ago"),
            (Duration::days(1), "1 day ago"),
            (Duration::days(40), "1 month ago"),
            (Duration::days(800), "2 years ago"),
        ];
        for (ago, expected) in cases {
            assert_eq!(relative_time(now - ago, now), expected);
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 100), "short");
        let long = "word ".repeat(40);
        let cut = truncate(&long, 20);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= 20);
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_card_contents() {
        let now = Utc::now();
        let task = BoardTask {
            id: "1".into(),
            title: "Buy milk".into(),
            description: "x".repeat(150),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            user: None,
            created_at: Some(now - Duration::days(3)),
            updated_at: Some(now - Duration::hours(2)),
        };
        let card = Card::new(&task, now);

        assert_eq!(card.priority_badge, "High");
        assert_eq!(card.status_badge, "In Progress");
        assert_eq!(card.description.chars().count(), DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(card.created.as_deref(), Some("3 days ago"));
        assert_eq!(card.updated.as_deref(), Some("2 hours ago"));
        assert!(card.recently_updated);

        let stale = BoardTask {
            updated_at: Some(now - Duration::days(2)),
            ..task
        };
        assert!(!Card::new(&stale, now).recently_updated);
    }
}
