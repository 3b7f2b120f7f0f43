use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

use crate::auth::{AuthResponse, CurrentUser, LoginRequest, RegisterRequest, SESSION_COOKIE, SESSION_TTL_DAYS};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the session cookie: HTTP-only, path-scoped, 7-day max-age,
/// same-site-lax, secure when configured for production.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .http_only(true)
        .path("/")
        .max_age(CookieDuration::days(SESSION_TTL_DAYS))
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .http_only(true)
        .path("/")
        .max_age(CookieDuration::ZERO)
        .same_site(SameSite::Lax)
        .finish()
}

/// Register a new user
///
/// Creates the account, opens a session, and sets the session cookie.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let (user, token) = state
        .auth
        .register(
            &register_data.name,
            &register_data.email,
            &register_data.password,
        )
        .await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(token, state.cookie_secure))
        .json(AuthResponse {
            user,
            message: "User created successfully".to_string(),
        }))
}

/// Login user
///
/// Authenticates the credentials, opens a session, and sets the session cookie.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let (user, token) = state
        .auth
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, state.cookie_secure))
        .json(AuthResponse {
            user,
            message: "Login successful".to_string(),
        }))
}

/// Logout user
///
/// Deletes the session named by the cookie (if any) and clears the cookie.
/// Always succeeds: logging out twice, or with a stale cookie, is a no-op.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.auth.logout(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(cleared_session_cookie())
        .json(json!({ "message": "Logout successful" })))
}

/// Current user
///
/// Returns the identity the session cookie resolves to.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "user": user.0 })))
}
