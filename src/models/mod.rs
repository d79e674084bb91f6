pub mod task;
pub mod user;

pub use task::{Task, TaskFields, TaskInput, TaskPriority, TaskStatus, TasksByStatus};
pub use user::{User, UserRecord};
