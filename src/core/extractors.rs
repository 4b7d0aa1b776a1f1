//! Axum extractors for authenticated requests
//!
//! Handlers that need a logged-in user take an [`AuthSession`] argument.
//! The extractor reads `Authorization: Bearer <token>` and resolves the token
//! through the [`AccountService`], so a handler only ever sees a live session.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use uuid::Uuid;

use crate::core::error::{EstyleError, RequestError};
use crate::core::service::AccountService;
use crate::core::session::Session;

/// Parse the session token out of the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<Uuid, RequestError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| RequestError::Unauthorized {
            message: "missing Authorization header".to_string(),
        })?
        .to_str()
        .map_err(|_| RequestError::Unauthorized {
            message: "Authorization header is not valid text".to_string(),
        })?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or_else(|| RequestError::Unauthorized {
            message: "expected a Bearer token".to_string(),
        })?;

    token
        .trim()
        .parse::<Uuid>()
        .map_err(|_| RequestError::Unauthorized {
            message: "malformed session token".to_string(),
        })
}

/// The caller's live session
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl AuthSession {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn token(&self) -> Uuid {
        self.0.token
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
    AccountService: FromRef<S>,
{
    type Rejection = EstyleError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let accounts = AccountService::from_ref(state);

        accounts
            .session(&token)
            .await
            .map(AuthSession)
            .ok_or_else(|| {
                RequestError::Unauthorized {
                    message: "unknown or expired session".to_string(),
                }
                .into()
            })
    }
}
