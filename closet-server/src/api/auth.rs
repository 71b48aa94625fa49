//! Bearer-token authentication middleware
//!
//! Protected routes expect `Authorization: Bearer <token>`. The token is
//! resolved against the sessions table and the owning user is attached to
//! the request as an [`AuthUser`] extension.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use closet_common::db::User;
use tracing::debug;

use crate::api::ApiError;
use crate::AppState;

/// Authenticated caller, available to protected handlers
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    /// Token the request was made with
    pub token: String,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        ApiError::Unauthorized("Not authorized, no token provided".to_string())
    })?;

    let user = state.store.resolve_session(&token).await.map_err(|e| {
        debug!("Rejected session token: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { user, token });
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123".to_string()));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
