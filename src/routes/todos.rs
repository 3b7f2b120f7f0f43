use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::{TodoInput, TodoPatch};
use crate::state::AppState;

/// Retrieves all todos for the authenticated user, newest first.
///
/// This is the only server-side ordering; filtering, searching, and the other
/// sort orders are derived views computed by the client over the full list
/// (see `crate::views`). No pagination.
#[get("")]
pub async fn list_todos(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let todos = state.store.list_todos(user.0.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "todos": todos })))
}

/// Creates a todo owned by the authenticated user.
///
/// Defaults: status `todo`, `completed` false, priority `medium`.
/// Returns the full stored record including generated id and timestamps.
#[post("")]
pub async fn create_todo(
    state: web::Data<AppState>,
    user: CurrentUser,
    input: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let todo = state.store.create_todo(user.0.id, &input).await?;
    Ok(HttpResponse::Created().json(json!({ "todo": todo })))
}

/// Retrieves a single todo by id.
///
/// A todo owned by someone else yields the same 404 as a nonexistent id.
#[get("/{id}")]
pub async fn get_todo(
    state: web::Data<AppState>,
    user: CurrentUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let todo = state
        .store
        .todo_by_id(user.0.id, todo_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "todo": todo })))
}

/// Partially updates a todo.
///
/// Only supplied fields change; `updated_at` is refreshed regardless.
/// `completed` and `status` are accepted independently.
#[put("/{id}")]
pub async fn update_todo(
    state: web::Data<AppState>,
    user: CurrentUser,
    todo_id: web::Path<i32>,
    patch: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let todo = state
        .store
        .update_todo(user.0.id, todo_id.into_inner(), &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "todo": todo })))
}

/// Permanently deletes a todo. No soft delete, no undo.
#[delete("/{id}")]
pub async fn delete_todo(
    state: web::Data<AppState>,
    user: CurrentUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let deleted = state
        .store
        .delete_todo(user.0.id, todo_id.into_inner())
        .await?;

    if !deleted {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Todo deleted successfully" })))
}
