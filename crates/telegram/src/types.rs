use chrono::{DateTime, Utc};
use serde::Serialize;

// ── Chat targets ─────────────────────────────────────────────────────────────

/// A parsed chat identifier: either a username handle or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    /// Username without the leading `@`.
    Username(String),
    /// Numeric account/group/channel id.
    Id(i64),
}

impl ChatTarget {
    /// Parse a raw `chat_id` string.
    ///
    /// Text that is all digits after an optional leading `-` is a numeric
    /// id; everything else is treated as a username, with any leading `@`
    /// stripped. Returns `None` for empty input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            raw.parse().ok().map(Self::Id)
        } else {
            Some(Self::Username(raw.trim_start_matches('@').to_string()))
        }
    }
}

impl std::fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username(name) => write!(f, "@{name}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

// ── Projections returned by the client ───────────────────────────────────────

/// Identity of the authenticated account.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

/// Outcome of a successful message dispatch.
#[derive(Debug, Clone, Copy)]
pub struct SentMessage {
    pub id: i32,
    pub date: DateTime<Utc>,
}

/// Sender of a history message, when it is a user.
#[derive(Debug, Clone, Serialize)]
pub struct FromUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub is_bot: bool,
}

/// One entry of a chat-history page, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryMessage {
    pub message_id: i32,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    pub from_user: Option<FromUser>,
}

/// One entry of the account's dialog list.
#[derive(Debug, Clone, Serialize)]
pub struct DialogSummary {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: Option<String>,
}
