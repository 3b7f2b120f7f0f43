use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::service::AuthService;
use crate::error::AppError;

/// Name of the session cookie set at login/registration.
pub const SESSION_COOKIE: &str = "session";

/// Session gate: resolves the session cookie to a `User` and injects it into
/// request extensions, or rejects with 401. Resolution requires a store round
/// trip, so the wrapped service is shared behind an `Rc` for the async call.
pub struct AuthMiddleware {
    auth: AuthService,
}

impl AuthMiddleware {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            auth: self.auth.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    auth: AuthService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Unauthenticated endpoints. Logout is deliberately open so that it
        // stays idempotent for stale or already-invalidated cookies.
        let path = req.path();
        if path == "/health"
            || path == "/auth/register"
            || path == "/auth/login"
            || path == "/auth/logout"
        {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let auth = self.auth.clone();
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .cookie(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string());

            let token = match token {
                Some(token) => token,
                None => {
                    let err: Error = AppError::Unauthorized("Not authenticated".into()).into();
                    return Ok(req
                        .into_response(HttpResponse::from_error(err))
                        .map_into_right_body());
                }
            };

            match auth.resolve_session(&token).await? {
                Some(user) => {
                    req.extensions_mut().insert(user);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                None => {
                    let err: Error = AppError::Unauthorized("Invalid session".into()).into();
                    Ok(req
                        .into_response(HttpResponse::from_error(err))
                        .map_into_right_body())
                }
            }
        })
    }
}
