//!
//! # Derived Views
//!
//! The server returns the full todo list in one fixed order (newest first);
//! every other presentation is a derived view recomputed by the consumer over
//! that list. These helpers are those views: status/search filtering, the four
//! sort orders, and the kanban column grouping. Nothing here is persisted.

use crate::models::{Todo, TodoStatus};

/// Sort orders offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first. The server's own ordering.
    CreatedAt,
    /// Ascending; todos without a due date sort after all dated ones.
    DueDate,
    /// Most urgent first: urgent < high < medium < low.
    Priority,
    /// Case-aware lexicographic title order.
    Title,
}

/// Keeps todos matching the status (when given) and containing the search term
/// (when given) in title or description, case-insensitively.
pub fn filter_todos(
    todos: Vec<Todo>,
    status: Option<TodoStatus>,
    search: Option<&str>,
) -> Vec<Todo> {
    let needle = search.map(|s| s.to_lowercase());
    todos
        .into_iter()
        .filter(|todo| {
            if let Some(status) = status {
                if todo.status != status {
                    return false;
                }
            }
            if let Some(needle) = &needle {
                let in_title = todo.title.to_lowercase().contains(needle);
                let in_description = todo
                    .description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(needle))
                    .unwrap_or(false);
                if !in_title && !in_description {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Stable sort: equal and missing keys keep their original relative order.
pub fn sort_todos(todos: &mut [Todo], key: SortKey) {
    match key {
        SortKey::CreatedAt => todos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Priority => todos.sort_by_key(|t| t.priority.rank()),
        SortKey::DueDate => todos.sort_by(|a, b| match (&a.due_date, &b.due_date) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }),
        SortKey::Title => todos.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

/// Kanban columns in board order, each keeping the incoming list order.
pub fn group_by_status(todos: Vec<Todo>) -> [(TodoStatus, Vec<Todo>); 3] {
    let mut pending = Vec::new();
    let mut in_progress = Vec::new();
    let mut completed = Vec::new();
    for todo in todos {
        match todo.status {
            TodoStatus::Todo => pending.push(todo),
            TodoStatus::InProgress => in_progress.push(todo),
            TodoStatus::Completed => completed.push(todo),
        }
    }
    [
        (TodoStatus::Todo, pending),
        (TodoStatus::InProgress, in_progress),
        (TodoStatus::Completed, completed),
    ]
}
