use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use gramgate_telegram::ClientError;

/// Gateway error taxonomy, one variant per HTTP outcome.
///
/// Everything a handler can fail with collapses into one of these; the
/// `IntoResponse` impl is the single place status codes are chosen.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid bearer token.
    #[error("invalid API key")]
    Unauthorized,

    /// The stored Telegram session no longer works.
    #[error("session expired or invalid")]
    SessionExpired,

    /// Request failed schema validation; message names the field.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// Telegram flood control; seconds until retry is allowed.
    #[error("rate limited. please wait {0} seconds")]
    RateLimited(u32),

    /// Anything unmapped. The inner message is logged, never returned.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!(error = %cause, "unexpected failure");
        }
        let status = self.status();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        let mut response = (status, body).into_response();
        if let Self::RateLimited(seconds) = self {
            if let Ok(value) = seconds.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound => Self::NotFound("invalid chat_id or user not found".into()),
            ClientError::Forbidden(msg) => Self::Forbidden(msg),
            ClientError::FloodWait(seconds) => Self::RateLimited(seconds),
            ClientError::Unauthorized => Self::SessionExpired,
            ClientError::Transient(cause) => Self::Internal(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_onto_statuses() {
        let cases = [
            (ClientError::NotFound, StatusCode::NOT_FOUND),
            (
                ClientError::Forbidden("blocked".into()),
                StatusCode::FORBIDDEN,
            ),
            (ClientError::FloodWait(5), StatusCode::TOO_MANY_REQUESTS),
            (ClientError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ClientError::Transient("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (client_err, expected) in cases {
            assert_eq!(ApiError::from(client_err).status(), expected);
        }
    }

    #[test]
    fn internal_detail_is_generic() {
        let err = ApiError::Internal("secret backtrace".into());
        assert_eq!(err.to_string(), "internal server error");
    }
}
