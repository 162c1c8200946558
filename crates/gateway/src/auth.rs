use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Constant-time string comparison (prevents timing attacks).
fn safe_equal(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    // XOR each byte and accumulate; any difference makes result non-zero.
    let diff = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    diff == 0
}

/// Extract the token from a `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

// ── Auth logic ───────────────────────────────────────────────────────────────

/// Check the request's bearer token against the configured API key.
pub fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), ApiError> {
    match bearer_token(headers) {
        Some(token) if safe_equal(token, api_key) => Ok(()),
        Some(_) => {
            warn!("invalid API key attempt");
            Err(ApiError::Unauthorized)
        },
        None => Err(ApiError::Unauthorized),
    }
}

/// Route-layer middleware: reject unauthenticated requests before any body
/// parsing happens, so a bad token always yields 401 regardless of payload.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(request.headers(), state.api_key())?;
    Ok(next.run(request).await)
}
