//! Bearer token extraction middleware
//!
//! Requires `Authorization: Bearer <token>` on the vehicle routes and
//! hands the caller's token to handlers as an [`AccessToken`] extension.
//! The token is not validated here; the vehicle-data API does that.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;

/// The caller's vehicle-data API access token
#[derive(Clone)]
pub struct AccessToken(pub String);

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Axum middleware function that requires a bearer token.
///
/// Returns 401 if the header is missing, malformed or empty.
pub async fn require_bearer(mut request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match token {
        Some(token) => {
            request.extensions_mut().insert(AccessToken(token));
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!(
                path = %request.uri().path(),
                "Missing or malformed Authorization header"
            );
            Err(ApiError::Unauthorized(
                "Missing bearer access token".to_string(),
            ))
        }
    }
}
