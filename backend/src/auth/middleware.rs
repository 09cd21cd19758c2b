//! Authentication extractor
//!
//! Validates the bearer token on protected routes. Every failure (missing
//! header, wrong scheme, bad signature, expired, unparseable subject)
//! produces the same 401 body; the specific reason is only logged.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

/// Authenticated user extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                debug!("missing authorization header");
                ApiError::invalid_token()
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            debug!("authorization header is not a bearer token");
            ApiError::invalid_token()
        })?;

        let claims = app_state.jwt().validate_token(token).map_err(|e| {
            debug!(error = %e, "token rejected");
            ApiError::invalid_token()
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            debug!(sub = %claims.sub, "token subject is not a user id");
            ApiError::invalid_token()
        })?;

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_debug() {
        let user = AuthUser { user_id: 1 };
        let debug_str = format!("{:?}", user);
        assert!(debug_str.contains("AuthUser"));
    }
}
