use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the priority of a todo.
/// Corresponds to the `todo_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TodoPriority {
    /// Sort rank: most urgent first. Used by the priority derived view.
    pub fn rank(&self) -> u8 {
        match self {
            TodoPriority::Urgent => 0,
            TodoPriority::High => 1,
            TodoPriority::Medium => 2,
            TodoPriority::Low => 3,
        }
    }
}

/// Represents the status of a todo.
/// Corresponds to the `todo_status` SQL enum and the kanban columns.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Todo,
    InProgress,
    Completed,
}

/// A todo entity as stored and returned by the API. Owned by exactly one user.
///
/// `completed` and `status` are independent fields: UI-driven updates keep them
/// in lockstep, but the backend accepts either one without the other.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo. Status is never accepted at creation; new todos
/// always start as `todo` / not completed.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,

    /// Defaults to `medium` when unspecified.
    pub priority: Option<TodoPriority>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update: only supplied fields change, unsupplied fields retain their
/// prior values. `description` and `due_date` distinguish "absent" from an
/// explicit `null` (which clears the stored value).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TodoPatch {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    pub status: Option<TodoStatus>,

    pub priority: Option<TodoPriority>,

    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    pub completed: Option<bool>,
}

/// Deserializes a present-but-possibly-null field into `Some(Option<T>)`,
/// leaving absent fields as `None` via `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
