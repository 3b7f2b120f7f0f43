use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Session, Todo, TodoInput, TodoPatch, TodoPriority, TodoStatus, User, UserRecord};
use crate::store::Store;

const TODO_COLUMNS: &str =
    "id, user_id, title, description, status, priority, due_date, completed, created_at, updated_at";

/// Postgres-backed store. All queries are single statements scoped by owner
/// and bound through parameters.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
             RETURNING id, name, email, created_at, updated_at",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_session(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn session_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, expires_at, created_at FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_todos(&self, owner_id: i32) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn create_todo(&self, owner_id: i32, input: &TodoInput) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (user_id, title, description, status, priority, due_date, completed)
             VALUES ($1, $2, $3, $4, $5, $6, false)
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(TodoStatus::Todo)
        .bind(input.priority.unwrap_or(TodoPriority::Medium))
        .bind(input.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn todo_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update_todo(
        &self,
        owner_id: i32,
        id: i32,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        // SET clause is assembled dynamically from the supplied fields;
        // updated_at is always refreshed, even for an empty patch.
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param = 2;

        if patch.title.is_some() {
            sets.push(format!("title = ${param}"));
            param += 1;
        }
        if patch.description.is_some() {
            sets.push(format!("description = ${param}"));
            param += 1;
        }
        if patch.status.is_some() {
            sets.push(format!("status = ${param}"));
            param += 1;
        }
        if patch.priority.is_some() {
            sets.push(format!("priority = ${param}"));
            param += 1;
        }
        if patch.due_date.is_some() {
            sets.push(format!("due_date = ${param}"));
            param += 1;
        }
        if patch.completed.is_some() {
            sets.push(format!("completed = ${param}"));
            param += 1;
        }

        let sql = format!(
            "UPDATE todos SET {} WHERE id = ${} AND user_id = ${} RETURNING {TODO_COLUMNS}",
            sets.join(", "),
            param,
            param + 1,
        );

        let mut query = sqlx::query_as::<_, Todo>(&sql).bind(Utc::now());

        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(description) = &patch.description {
            // Explicit null clears the stored description.
            query = query.bind(description.as_deref());
        }
        if let Some(status) = patch.status {
            query = query.bind(status);
        }
        if let Some(priority) = patch.priority {
            query = query.bind(priority);
        }
        if let Some(due_date) = patch.due_date {
            query = query.bind(due_date);
        }
        if let Some(completed) = patch.completed {
            query = query.bind(completed);
        }

        let todo = query
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(todo)
    }

    async fn delete_todo(&self, owner_id: i32, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
