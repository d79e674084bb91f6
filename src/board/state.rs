use super::model::BoardTask;
use crate::models::TaskStatus;

/// One status column. Tasks keep the order the server listed them in (newest first).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<BoardTask>,
}

/// The three-column layout of a user's tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: [Column; 3],
}

impl Board {
    /// Partitions tasks into the columns matching their status.
    pub fn from_tasks(tasks: Vec<BoardTask>) -> Self {
        let mut columns = TaskStatus::ALL.map(|status| Column {
            status,
            tasks: Vec::new(),
        });
        for task in tasks {
            let index = column_index(task.status);
            columns[index].tasks.push(task);
        }
        Board { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &Column {
        &self.columns[column_index(status)]
    }

    pub fn find(&self, id: &str) -> Option<&BoardTask> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn column_index(status: TaskStatus) -> usize {
    match status {
        TaskStatus::YetToStart => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Completed => 2,
    }
}

/// Everything the board view needs to render. Produced by a fetch and replaced
/// wholesale by the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardState {
    Loading,
    /// The initial fetch failed; the view offers a retry.
    Failed { message: String },
    Ready(Board),
}

impl BoardState {
    pub fn board(&self) -> Option<&Board> {
        match self {
            BoardState::Ready(board) => Some(board),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn task(id: &str, status: TaskStatus) -> BoardTask {
        BoardTask {
            id: id.into(),
            title: format!("Task {}", id),
            description: String::new(),
            priority: TaskPriority::Low,
            status,
            user: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let board = Board::from_tasks(vec![
            task("1", TaskStatus::Completed),
            task("2", TaskStatus::YetToStart),
            task("3", TaskStatus::Completed),
        ]);

        let ids = |status| -> Vec<String> {
            board.column(status).tasks.iter().map(|t| t.id.clone()).collect()
        };
        assert_eq!(ids(TaskStatus::YetToStart), vec!["2"]);
        assert!(ids(TaskStatus::InProgress).is_empty());
        assert_eq!(ids(TaskStatus::Completed), vec!["1", "3"]);
        assert_eq!(board.len(), 3);
        assert_eq!(
            board.columns().iter().map(|c| c.status).collect::<Vec<_>>(),
            TaskStatus::ALL.to_vec()
        );
    }

    #[test]
    fn test_find() {
        let board = Board::from_tasks(vec![task("a", TaskStatus::InProgress)]);
        assert_eq!(board.find("a").map(|t| t.status), Some(TaskStatus::InProgress));
        assert!(board.find("missing").is_none());
        assert!(BoardState::Loading.board().is_none());
    }
}
