//! Plain-text rendering of the board for terminals.

use chrono::{DateTime, Utc};

use super::card::Card;
use super::state::{Board, BoardState, Column};

pub fn render_state(state: &BoardState, now: DateTime<Utc>) -> String {
    match state {
        BoardState::Loading => "Loading tasks...\n".to_string(),
        BoardState::Failed { message } => format!("{}\n[Retry]\n", message),
        BoardState::Ready(board) => render_board(board, now),
    }
}

pub fn render_board(board: &Board, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for column in board.columns() {
        render_column(&mut out, column, now);
    }
    out
}

fn render_column(out: &mut String, column: &Column, now: DateTime<Utc>) {
    let heading = column.status.label();
    out.push_str(&format!("== {} ({}) ==\n", heading, column.tasks.len()));
    if column.tasks.is_empty() {
        out.push_str(&format!("  No tasks in \"{}\"\n", heading));
    }
    for task in &column.tasks {
        out.push_str(&render_card(&Card::new(task, now)));
    }
    out.push('\n');
}

fn render_card(card: &Card) -> String {
    let marker = if card.recently_updated { "*" } else { " " };
    let mut text = format!(
        " {}[{}] {}  ({})\n",
        marker, card.priority_badge, card.title, card.id
    );
    if !card.description.is_empty() {
        text.push_str(&format!("      {}\n", card.description));
    }
    text.push_str("      ");
    text.push_str(card.status_badge);
    if let Some(created) = &card.created {
        text.push_str(&format!(" | created {}", created));
    }
    if let Some(updated) = &card.updated {
        text.push_str(&format!(" | updated {}", updated));
    }
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::BoardTask;
    use crate::models::{TaskPriority, TaskStatus};
    use chrono::Duration;

    #[test]
    fn test_render_columns_and_placeholders() {
        let now = Utc::now();
        let board = Board::from_tasks(vec![BoardTask {
            id: "t1".into(),
            title: "Buy milk".into(),
            description: "2%".into(),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            user: None,
            created_at: Some(now - Duration::hours(3)),
            updated_at: Some(now),
        }]);
        let text = render_state(&BoardState::Ready(board), now);

        assert!(text.contains("== Yet To Start (0) =="));
        assert!(text.contains("No tasks in \"Yet To Start\""));
        assert!(text.contains("== In Progress (1) =="));
        assert!(text.contains("*[High] Buy milk  (t1)"));
        assert!(text.contains("In Progress | created 3 hours ago | updated just now"));
        assert!(text.contains("== Completed (0) =="));
    }

    #[test]
    fn test_render_other_states() {
        let now = Utc::now();
        assert_eq!(render_state(&BoardState::Loading, now), "Loading tasks...\n");
        let failed = BoardState::Failed {
            message: "Token expired".into(),
        };
        assert!(render_state(&failed, now).starts_with("Token expired"));
    }

    #[test]
    fn test_render_card_without_optional_parts() {
        let card = Card::new(
            &BoardTask {
                id: "t2".into(),
                title: "Untitled Task".into(),
                description: String::new(),
                priority: TaskPriority::Low,
                status: TaskStatus::Completed,
                user: None,
                created_at: None,
                updated_at: None,
            },
            Utc::now(),
        );
        assert_eq!(
            render_card(&card),
            "  [Low] Untitled Task  (t2)\n      Completed\n"
        );
    }
}
