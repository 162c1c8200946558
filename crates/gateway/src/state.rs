use std::sync::Arc;

use gramgate_telegram::Messenger;

/// Shared request state: the configured API key and the injected
/// messaging-client handle.
///
/// Both are fixed at startup; handlers never mutate process state.
#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    pub messenger: Arc<dyn Messenger>,
}

impl AppState {
    pub fn new(api_key: &str, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            api_key: api_key.into(),
            messenger,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
