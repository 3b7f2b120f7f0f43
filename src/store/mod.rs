//!
//! # Backing Store
//!
//! The store is the only shared mutable resource in the system. It is injected
//! into the services and handlers as an explicit `Arc<dyn Store>` handle rather
//! than reached through a global, with its lifetime scoped to process startup
//! and shutdown.
//!
//! Every operation is a single atomic statement scoped by owner (and id where
//! applicable); no operation reads-then-writes across records, so concurrent
//! requests resolve last-writer-wins and the loser of an update/delete race
//! observes "not found".

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Session, Todo, TodoInput, TodoPatch, User, UserRecord};

/// Persistence operations for users, sessions, and todos.
///
/// Todo operations are implicitly owner-scoped: a record belonging to another
/// owner behaves exactly as if it did not exist.
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    // Sessions

    async fn insert_session(&self, session: &Session) -> Result<(), AppError>;

    async fn session_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;

    /// Idempotent: deleting an absent session is not an error.
    async fn delete_session(&self, id: &str) -> Result<(), AppError>;

    // Todos

    /// All todos for the owner, newest first (`created_at` DESC, id DESC).
    async fn list_todos(&self, owner_id: i32) -> Result<Vec<Todo>, AppError>;

    /// Inserts with defaults: status `todo`, `completed` false, priority
    /// `medium` when unspecified.
    async fn create_todo(&self, owner_id: i32, input: &TodoInput) -> Result<Todo, AppError>;

    async fn todo_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Todo>, AppError>;

    /// Applies only the supplied fields and always refreshes `updated_at`,
    /// even for an empty patch. `None` when no record matches owner + id.
    async fn update_todo(
        &self,
        owner_id: i32,
        id: i32,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError>;

    /// `false` when no record matched owner + id.
    async fn delete_todo(&self, owner_id: i32, id: i32) -> Result<bool, AppError>;
}
