use anyhow::Context;
use async_trait::async_trait;
use grammers_client::{Client, Config, InitParams, session::Session, types::Chat};
use tracing::{debug, info};

use gramgate_config::Credentials;

use crate::{
    error::{ClientError, map_invocation},
    types::{AccountInfo, ChatTarget, DialogSummary, FromUser, HistoryMessage, SentMessage},
};

/// Dialog-scan bound when resolving a numeric chat id.
const ID_RESOLVE_DIALOG_LIMIT: usize = 500;

// ── Capability trait ─────────────────────────────────────────────────────────

/// Messaging capabilities the gateway needs from the underlying client.
///
/// One implementation is shared for the process lifetime; concurrent
/// requests may call it without external locking.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Identity of the authenticated account.
    async fn get_me(&self) -> Result<AccountInfo, ClientError>;

    /// Dispatch exactly one text message to the target chat.
    async fn send_message(
        &self,
        target: &ChatTarget,
        text: &str,
    ) -> Result<SentMessage, ClientError>;

    /// Fetch up to `limit` most recent messages from the target chat.
    async fn chat_history(
        &self,
        target: &ChatTarget,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, ClientError>;

    /// List up to `limit` of the account's dialogs.
    async fn list_dialogs(&self, limit: usize) -> Result<Vec<DialogSummary>, ClientError>;
}

// ── grammers-backed implementation ───────────────────────────────────────────

/// Production [`Messenger`] backed by a grammers MTProto client.
///
/// The inner client is cheaply cloneable and internally synchronized, so a
/// single instance serves all requests.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
}

impl TelegramClient {
    /// Resume the session stored in the credentials and verify it is
    /// authorized. Any failure here is fatal to startup.
    pub async fn connect(creds: &Credentials) -> anyhow::Result<Self> {
        let session = Session::load(&creds.session_bytes()?)
            .map_err(|e| anyhow::anyhow!("SESSION_STRING does not decode to a session: {e:?}"))?;

        let client = Client::connect(Config {
            session,
            api_id: creds.api_id,
            api_hash: creds.api_hash().to_string(),
            // Flood waits surface to the caller as errors instead of
            // being slept through inside grammers.
            params: InitParams {
                flood_sleep_threshold: 0,
                ..Default::default()
            },
        })
        .await
        .context("failed to connect to Telegram")?;

        if !client.is_authorized().await? {
            anyhow::bail!("session is not authorized; generate a fresh SESSION_STRING");
        }

        info!("telegram client connected");
        Ok(Self { client })
    }

    /// Resolve a chat target to a concrete chat.
    ///
    /// Usernames go through Telegram's resolver. Numeric ids carry no
    /// access hash, so they are matched against the account's own dialog
    /// list; an id outside it is NotFound.
    async fn resolve(&self, target: &ChatTarget) -> Result<Chat, ClientError> {
        match target {
            ChatTarget::Username(name) => self
                .client
                .resolve_username(name)
                .await
                .map_err(map_invocation)?
                .ok_or(ClientError::NotFound),
            ChatTarget::Id(id) => {
                let mut dialogs = self.client.iter_dialogs().limit(ID_RESOLVE_DIALOG_LIMIT);
                while let Some(dialog) = dialogs.next().await.map_err(map_invocation)? {
                    if dialog.chat().id() == *id {
                        return Ok(dialog.chat().clone());
                    }
                }
                debug!(chat_id = id, "numeric id not present in dialog list");
                Err(ClientError::NotFound)
            },
        }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn get_me(&self) -> Result<AccountInfo, ClientError> {
        let me = self.client.get_me().await.map_err(map_invocation)?;
        Ok(AccountInfo {
            id: me.id(),
            first_name: me.first_name().to_string(),
            last_name: me.last_name().map(str::to_string),
            username: me.username().map(str::to_string),
            phone: me.phone().map(str::to_string),
        })
    }

    async fn send_message(
        &self,
        target: &ChatTarget,
        text: &str,
    ) -> Result<SentMessage, ClientError> {
        let chat = self.resolve(target).await?;
        let message = self
            .client
            .send_message(&chat, text)
            .await
            .map_err(map_invocation)?;
        info!(chat = %target, message_id = message.id(), "message sent");
        Ok(SentMessage {
            id: message.id(),
            date: message.date(),
        })
    }

    async fn chat_history(
        &self,
        target: &ChatTarget,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, ClientError> {
        let chat = self.resolve(target).await?;
        let mut iter = self.client.iter_messages(&chat).limit(limit);
        let mut messages = Vec::new();
        while let Some(message) = iter.next().await.map_err(map_invocation)? {
            let from_user = message.sender().and_then(|sender| match sender {
                Chat::User(user) => Some(FromUser {
                    id: user.id(),
                    username: user.username().map(str::to_string),
                    first_name: user.first_name().to_string(),
                    is_bot: user.is_bot(),
                }),
                _ => None,
            });
            let text = message.text();
            messages.push(HistoryMessage {
                message_id: message.id(),
                date: message.date(),
                text: (!text.is_empty()).then(|| text.to_string()),
                from_user,
            });
        }
        debug!(chat = %target, count = messages.len(), "history fetched");
        Ok(messages)
    }

    async fn list_dialogs(&self, limit: usize) -> Result<Vec<DialogSummary>, ClientError> {
        let mut iter = self.client.iter_dialogs().limit(limit);
        let mut chats = Vec::new();
        while let Some(dialog) = iter.next().await.map_err(map_invocation)? {
            let chat = dialog.chat();
            chats.push(DialogSummary {
                id: chat.id(),
                title: chat.name().to_string(),
                kind: match chat {
                    Chat::User(_) => "user".to_string(),
                    Chat::Group(_) => "group".to_string(),
                    Chat::Channel(_) => "channel".to_string(),
                },
                username: chat.username().map(str::to_string),
            });
        }
        debug!(count = chats.len(), "dialogs fetched");
        Ok(chats)
    }
}
