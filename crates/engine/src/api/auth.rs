//! Bearer-token authentication for HTTP routes
//!
//! `require_auth` resolves the `Authorization: Bearer <token>` header to a
//! user through the identity provider and stores the result in the request
//! extensions. Handlers read it back with the [`Auth`] extractor.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/campaigns", get(list_campaigns))
//!     .route_layer(middleware::from_fn_with_state(app.clone(), require_auth));
//!
//! async fn list_campaigns(Auth(user): Auth) -> impl IntoResponse {
//!     format!("Hello, {}", user.user_id)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use lorekeeper_domain::UserId;

use super::error::ApiError;
use crate::app::App;
use crate::infrastructure::ports::AuthError;

/// Caller identity attached by [`require_auth`]
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
///
/// Returns 401 when the header is missing, is not a bearer credential, or
/// the identity provider rejects the token. CORS preflights pass through.
pub async fn require_auth(
    State(app): State<Arc<App>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())?.to_string();

    let user_id = app.identity.verify_token(&token).await.map_err(|e| match e {
        AuthError::InvalidToken => {
            tracing::debug!("Rejected bearer token");
            ApiError::Unauthorized("invalid token".to_string())
        }
        AuthError::Unavailable(detail) => {
            ApiError::Internal(format!("identity provider unavailable: {detail}"))
        }
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("authorization header required".to_string()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("invalid authorization header format".to_string()))
}

/// Extractor for the authenticated user in handlers
///
/// Only succeeds behind [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .map(Auth)
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}
