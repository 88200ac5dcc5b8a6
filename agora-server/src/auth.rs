//! Bearer-token authentication for the HTTP boundary.
//!
//! Token issuance belongs to the external auth service; this module only
//! resolves already-issued tokens to user ids through the `Authenticator`
//! seam, backed in production by the sessions table.
use std::sync::Arc;

use agora_repository::{RepositoryError, SessionRepository};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::server::state::AppState;

/// Resolves a bearer token to the authenticated user id.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn resolve(&self, token: Uuid) -> Result<Option<Uuid>, RepositoryError>;
}

/// Production authenticator: looks the token up in the session store.
pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionAuthenticator {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn resolve(&self, token: Uuid) -> Result<Option<Uuid>, RepositoryError> {
        self.sessions.resolve(token).await
    }
}

/// Extractor carrying the authenticated caller's user id.
///
/// Rejects with 401 when the `Authorization` header is missing, malformed,
/// or resolves to no session.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user_id = state.auth.resolve(token).await?.ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser(user_id))
    }
}

/// Parses `Authorization: Bearer <uuid>` out of the request headers.
fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}
