pub mod session;
pub mod todo;
pub mod user;

pub use session::Session;
pub use todo::{Todo, TodoInput, TodoPatch, TodoPriority, TodoStatus};
pub use user::{User, UserRecord};
