//! HTTP gateway: routing, bearer auth, request validation, status mapping.
//!
//! Lifecycle:
//! 1. Load credentials (crates/config)
//! 2. Connect the Telegram client (crates/telegram)
//! 3. Build the router and bind the listener
//!
//! Handlers hold no state of their own; every request is independently
//! authenticated and dispatched to the shared [`Messenger`] handle injected
//! through [`state::AppState`].
//!
//! [`Messenger`]: gramgate_telegram::Messenger

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
