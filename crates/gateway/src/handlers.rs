use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use gramgate_telegram::{AccountInfo, ChatTarget, DialogSummary, HistoryMessage};

use crate::{error::ApiError, state::AppState};

/// Telegram's own per-message text limit.
pub const MAX_MESSAGE_LEN: usize = 4096;

const DEFAULT_HISTORY_LIMIT: usize = 20;
const DIALOG_LIST_LIMIT: usize = 50;

// ── Request/response bodies ──────────────────────────────────────────────────

/// A validated send request. Built from the raw JSON body so every missing
/// or mistyped field yields a 400 with a field-level description instead of
/// the framework's default rejection.
#[derive(Debug)]
struct SendMessageRequest {
    chat_id: String,
    target: ChatTarget,
    message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: i32,
    pub chat_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    chat_id: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GetMessagesResponse {
    pub success: bool,
    pub chat_id: String,
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Serialize)]
pub struct GetChatsResponse {
    pub success: bool,
    pub chats: Vec<DialogSummary>,
}

// ── Validation ───────────────────────────────────────────────────────────────

fn require_string(body: &Value, field: &str) -> Result<String, ApiError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ApiError::Validation(format!(
            "{field} must be a non-empty string"
        ))),
        Some(_) => Err(ApiError::Validation(format!("{field} must be a string"))),
        None => Err(ApiError::Validation(format!(
            "missing required field: {field}"
        ))),
    }
}

fn parse_send_request(body: &Value) -> Result<SendMessageRequest, ApiError> {
    let chat_id = require_string(body, "chat_id")?;
    let target = ChatTarget::parse(&chat_id)
        .ok_or_else(|| ApiError::Validation("chat_id must be a non-empty string".into()))?;
    let message = require_string(body, "message")?;
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ApiError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(SendMessageRequest {
        chat_id,
        target,
        message,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_me(State(state): State<AppState>) -> Result<Json<AccountInfo>, ApiError> {
    Ok(Json(state.messenger.get_me().await?))
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let request = parse_send_request(&body)?;
    let sent = state
        .messenger
        .send_message(&request.target, &request.message)
        .await?;
    info!(chat_id = %request.chat_id, message_id = sent.id, "message dispatched");
    Ok(Json(SendMessageResponse {
        success: true,
        message_id: sent.id,
        chat_id: request.chat_id,
        timestamp: sent.date,
    }))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<GetMessagesResponse>, ApiError> {
    let chat_id = query
        .chat_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("chat_id query parameter is required".into()))?;
    let target = ChatTarget::parse(&chat_id)
        .ok_or_else(|| ApiError::Validation("chat_id must be a non-empty string".into()))?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let messages = state.messenger.chat_history(&target, limit).await?;
    Ok(Json(GetMessagesResponse {
        success: true,
        chat_id,
        messages,
    }))
}

pub async fn get_chats(State(state): State<AppState>) -> Result<Json<GetChatsResponse>, ApiError> {
    let chats = state.messenger.list_dialogs(DIALOG_LIST_LIMIT).await?;
    Ok(Json(GetChatsResponse {
        success: true,
        chats,
    }))
}
