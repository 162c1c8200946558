use grammers_client::InvocationError;
use thiserror::Error;

/// Failure kinds surfaced by the messaging client.
///
/// Every RPC failure from the underlying library collapses into one of
/// these; the gateway maps each kind onto an HTTP status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("chat or user not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("rate limited, retry in {0} seconds")]
    FloodWait(u32),

    #[error("session expired or invalid")]
    Unauthorized,

    #[error("telegram call failed: {0}")]
    Transient(String),
}

/// Classify a Telegram RPC error by name.
///
/// The name table mirrors the errors a personal-account send can raise:
/// unknown peers, membership/visibility restrictions, flood control, and
/// dead sessions. Unknown names are transient.
pub(crate) fn classify_rpc(name: &str, value: Option<u32>) -> ClientError {
    if name.starts_with("FLOOD") {
        return ClientError::FloodWait(value.unwrap_or(0));
    }
    match name {
        "PEER_ID_INVALID" | "USERNAME_NOT_OCCUPIED" | "USERNAME_INVALID" => ClientError::NotFound,
        "CHAT_WRITE_FORBIDDEN" | "CHANNEL_PRIVATE" | "USER_IS_BLOCKED"
        | "CHAT_ADMIN_REQUIRED" | "USER_NOT_PARTICIPANT" => {
            ClientError::Forbidden(format!("telegram refused the request ({name})"))
        },
        "AUTH_KEY_UNREGISTERED" | "SESSION_REVOKED" | "SESSION_EXPIRED" | "USER_DEACTIVATED" => {
            ClientError::Unauthorized
        },
        other => ClientError::Transient(format!("rpc error {other}")),
    }
}

/// Map a grammers invocation failure onto the taxonomy.
pub(crate) fn map_invocation(err: InvocationError) -> ClientError {
    match err {
        InvocationError::Rpc(rpc) => classify_rpc(&rpc.name, rpc.value),
        other => ClientError::Transient(other.to_string()),
    }
}
