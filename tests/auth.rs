mod common;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;

use ticklist::auth::AuthMiddleware;
use ticklist::routes;

macro_rules! spawn_app {
    () => {{
        let state = common::test_state();
        test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(AuthMiddleware::new(state.auth.clone()))
                .configure(routes::config),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_register_login_me_flow() {
    let app = spawn_app!();

    // Register a new user.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Integration User",
            "email": "integration@example.com",
            "password": "Password123!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookie = common::session_cookie(&resp);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(CookieDuration::days(7)));
    assert!(!cookie.value().is_empty());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "integration@example.com");
    assert_eq!(body["user"]["name"], "Integration User");
    assert_eq!(body["message"], "User created successfully");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // Registering the same email again fails.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Someone Else",
            "email": "integration@example.com",
            "password": "Password456!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User already exists");

    // Login with the registered credentials.
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "integration@example.com",
            "password": "Password123!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login_cookie = common::session_cookie(&resp);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");

    // The login session resolves via /auth/me.
    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(login_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "integration@example.com");
}

#[actix_rt::test]
async fn test_register_validation_messages() {
    let app = spawn_app!();

    // Malformed email.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "User",
            "email": "not-an-email",
            "password": "Password123!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid email");

    // Password shorter than 6 characters.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "User",
            "email": "user@example.com",
            "password": "12345",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Password must be at least 6 characters");

    // Empty name.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "",
            "email": "user@example.com",
            "password": "Password123!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Name is required");
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app!();
    common::register_user(&app, "User", "known@example.com", "Password123!").await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "known@example.com",
            "password": "wrong-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "unknown@example.com",
            "password": "Password123!",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: serde_json::Value = test::read_body_json(resp).await;

    // Same status, same body: no user-enumeration signal.
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], "Invalid credentials");
}

#[actix_rt::test]
async fn test_protected_routes_reject_missing_or_bad_sessions() {
    let app = spawn_app!();
    common::register_user(&app, "User", "user@example.com", "Password123!").await;

    // No cookie at all.
    let req = test::TestRequest::get().uri("/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(Cookie::new("session", "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Well-formed token signed with a different key: same rejection.
    let rotated = ticklist::auth::TokenSigner::new("some-other-secret");
    let (foreign_token, _) = rotated.issue(1).unwrap();
    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(Cookie::new("session", foreign_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_tampered_cookie_is_rejected() {
    let app = spawn_app!();
    let cookie = common::register_user(&app, "User", "user@example.com", "Password123!").await;

    // Flip one byte of the signed token.
    let mut token = cookie.value().to_string().into_bytes();
    let mid = token.len() / 2;
    token[mid] = if token[mid] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(token).unwrap();

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(Cookie::new("session", tampered))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_logout_clears_session_and_is_idempotent() {
    let app = spawn_app!();
    let cookie = common::register_user(&app, "User", "user@example.com", "Password123!").await;

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = common::session_cookie(&resp);
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(CookieDuration::ZERO));

    // The token no longer resolves even though its signature is still valid.
    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logging out again, or with no cookie, still succeeds.
    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
