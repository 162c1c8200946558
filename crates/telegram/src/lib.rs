//! Messaging-client adapter for a personal Telegram account.
//!
//! The gateway consumes the [`Messenger`] capability trait; the production
//! implementation is [`TelegramClient`], a thin wrapper over
//! `grammers-client` that resumes an MTProto session from stored
//! credentials and maps RPC failures onto the [`ClientError`] taxonomy.
//! All protocol work (session handling, entity resolution, flood control)
//! stays inside grammers.

pub mod client;
pub mod error;
pub mod types;

pub use client::{Messenger, TelegramClient};
pub use error::ClientError;
pub use types::{AccountInfo, ChatTarget, DialogSummary, FromUser, HistoryMessage, SentMessage};
