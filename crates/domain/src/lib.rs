pub mod error;
pub mod repeat_days;
pub mod todo;
pub mod user;

pub use error::DomainError;
pub use repeat_days::RepeatDays;
pub use todo::{NewTodo, Todo, TodoChanges, TodoRepository};
pub use user::{User, UserRepository};
