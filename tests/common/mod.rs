//! Shared helpers for the integration suite: an app state backed by the
//! in-memory store and cookie plumbing for authenticated requests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use serde_json::json;

use ticklist::auth::{AuthService, TokenSigner, SESSION_COOKIE};
use ticklist::state::AppState;
use ticklist::store::{MemStore, Store};

pub fn test_state() -> AppState {
    let store: Arc<dyn Store> = Arc::new(MemStore::new());
    let signer = Arc::new(TokenSigner::new("integration-test-secret"));
    let auth = AuthService::new(store.clone(), signer);
    AppState::new(store, auth, false)
}

/// Pulls the session cookie out of a login/register response.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("response should set the session cookie")
        .into_owned()
}

/// Registers a user and returns their session cookie.
pub async fn register_user<S, B>(app: &S, name: &str, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "registration should succeed"
    );
    session_cookie(&resp)
}

/// Creates a todo with the given cookie and returns the response body's `todo`.
pub async fn create_todo<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    body: serde_json::Value,
) -> serde_json::Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/todos")
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "todo creation should succeed"
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["todo"].clone()
}
