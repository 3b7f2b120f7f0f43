//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! the error taxonomy of the API: validation failures, duplicate unique keys,
//! authentication failures, missing records, and internal faults.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies. Internal and
//! database faults are logged server-side with full detail but surface to the client
//! as a generic message.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input (HTTP 400).
    /// Carries the first violated-field message.
    Validation(String),
    /// Duplicate unique key, e.g. an already-registered email (HTTP 400).
    Conflict(String),
    /// Missing, expired, or invalid credentials or session (HTTP 401).
    /// The message never distinguishes "wrong password" from "no such user".
    Unauthorized(String),
    /// Requested record absent or not owned by the caller (HTTP 404).
    /// Indistinguishable from "never existed".
    NotFound(String),
    /// Error originating from the backing store (HTTP 500).
    Database(String),
    /// Any other unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // Store and internal faults are logged in full but presented generically.
            AppError::Database(msg) | AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`, unique-constraint violations (SQLSTATE 23505)
/// map to `Conflict`, and anything else becomes a `Database` fault.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict("Record already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// Only the first violated field's message is surfaced, matching the
/// "first violation wins" contract of the API.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let message = errors
            .field_errors()
            .iter()
            .next()
            .and_then(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::Validation(message)
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// Hashing or verification failures are server faults, never client errors.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
