//! Bearer-token extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use staffdesk_auth_types::bearer::bearer_token;

use crate::error::DirectoryError;
use crate::state::AppState;
use crate::usecase::session::{AuthorizeUseCase, Session};

/// A request carrying a valid session token. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = DirectoryError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers);
        let state = state.clone();
        async move {
            let token = token.ok_or(DirectoryError::Unauthenticated)?;
            let usecase = AuthorizeUseCase {
                admins: state.admin_repo(),
                tokens: state.token_repo(),
            };
            usecase.execute(&token).await.map(Self)
        }
    }
}

/// A request without a valid session. Rejects with 403 when one is presented.
///
/// Stale or malformed tokens count as no session.
#[derive(Debug, Clone, Copy)]
pub struct Guest;

impl FromRequestParts<AppState> for Guest {
    type Rejection = DirectoryError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers);
        let state = state.clone();
        async move {
            let Some(token) = token else {
                return Ok(Self);
            };
            let usecase = AuthorizeUseCase {
                admins: state.admin_repo(),
                tokens: state.token_repo(),
            };
            match usecase.execute(&token).await {
                Ok(_) => Err(DirectoryError::AlreadyAuthenticated),
                Err(DirectoryError::Unauthenticated) => Ok(Self),
                Err(e) => Err(e),
            }
        }
    }
}
