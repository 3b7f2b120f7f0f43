pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::{AuthMiddleware, SESSION_COOKIE};
pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use token::{TokenSigner, SESSION_TTL_DAYS};

/// Payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(length(min = 1, max = 128, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Body returned after successful authentication (login or registration).
/// The session itself travels in the cookie, not in the body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: crate::models::User,
    pub message: String,
}
