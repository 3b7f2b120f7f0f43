use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Session, Todo, TodoInput, TodoPatch, TodoPriority, TodoStatus, User, UserRecord};
use crate::store::Store;

#[derive(Default)]
struct Inner {
    users: HashMap<i32, UserRecord>,
    sessions: HashMap<String, Session>,
    todos: HashMap<i32, Todo>,
    next_user_id: i32,
    next_todo_id: i32,
}

/// In-memory store. Backs the test suite and the development fallback when no
/// DATABASE_URL is configured. Semantics mirror `PgStore` exactly: owner
/// scoping, newest-first listing, partial updates, unique emails.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == email) {
            return Err(AppError::Conflict("Record already exists".into()));
        }

        inner.next_user_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: inner.next_user_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(record.id, record.clone());

        Ok(record.into())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned().map(User::from))
    }

    async fn insert_session(&self, session: &Session) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn session_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.get(id).cloned())
    }

    async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.sessions.remove(id);
        Ok(())
    }

    async fn list_todos(&self, owner_id: i32) -> Result<Vec<Todo>, AppError> {
        let inner = self.inner.read().await;
        let mut todos: Vec<Todo> = inner
            .todos
            .values()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn create_todo(&self, owner_id: i32, input: &TodoInput) -> Result<Todo, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_todo_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: inner.next_todo_id,
            user_id: owner_id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: TodoStatus::Todo,
            priority: input.priority.unwrap_or(TodoPriority::Medium),
            due_date: input.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn todo_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Todo>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .todos
            .get(&id)
            .filter(|t| t.user_id == owner_id)
            .cloned())
    }

    async fn update_todo(
        &self,
        owner_id: i32,
        id: i32,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let mut inner = self.inner.write().await;
        let todo = match inner.todos.get_mut(&id).filter(|t| t.user_id == owner_id) {
            Some(todo) => todo,
            None => return Ok(None),
        };

        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(status) = patch.status {
            todo.status = status;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();

        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, owner_id: i32, id: i32) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .todos
            .get(&id)
            .map(|t| t.user_id == owner_id)
            .unwrap_or(false);
        if owned {
            inner.todos.remove(&id);
        }
        Ok(owned)
    }
}
