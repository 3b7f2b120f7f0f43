//! Core business logic for the authentication lifecycle.
//!
//! Turns credentials into sessions and session tokens back into trusted
//! identities. Orchestrates password hashing, token issuance, and the
//! session rows in the store.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenSigner;
use crate::error::AppError;
use crate::models::{Session, User};
use crate::store::Store;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    signer: Arc<TokenSigner>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, signer: Arc<TokenSigner>) -> Self {
        Self { store, signer }
    }

    /// Creates a user and immediately opens a session for it.
    ///
    /// Input is assumed validated at the boundary; this checks the one
    /// constraint only the store can answer: email uniqueness.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        if self.store.user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(password)?;
        let user = self.store.create_user(name, email, &password_hash).await?;
        let token = self.open_session(user.id).await?;

        Ok((user, token))
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown email and wrong password both fail with the same error; the
    /// caller learns nothing about which one it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let record = self
            .store
            .user_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

        if !verify_password(password, &record.password_hash)? {
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }

        let token = self.open_session(record.id).await?;
        Ok((record.into(), token))
    }

    /// Deletes the session row. Idempotent: unknown tokens are not an error.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.store.delete_session(token).await
    }

    /// Resolves a token to its user, or `None` when the token is tampered,
    /// expired, or has no live session row. Absence is a normal outcome;
    /// only store faults surface as errors.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>, AppError> {
        if self.signer.verify(token).is_none() {
            return Ok(None);
        }

        let session = match self.store.session_by_id(token).await? {
            Some(session) => session,
            None => return Ok(None),
        };
        if session.is_expired(Utc::now()) {
            return Ok(None);
        }

        self.store.user_by_id(session.user_id).await
    }

    async fn open_session(&self, user_id: i32) -> Result<String, AppError> {
        let (token, expires_at) = self.signer.issue(user_id)?;
        self.store
            .insert_session(&Session {
                id: token.clone(),
                user_id,
                expires_at,
                created_at: Utc::now(),
            })
            .await?;
        Ok(token)
    }
}
