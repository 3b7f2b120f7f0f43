use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// Extracts the authenticated user from request extensions.
///
/// Intended for routes behind `AuthMiddleware`, which validates the session
/// cookie and inserts the resolved `User`. If the user is missing here the
/// middleware did not run; responding 401 is the safe default.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(CurrentUser(user))),
            None => {
                let err = AppError::Unauthorized("Not authenticated".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
