//! Process-wide credential loading.
//!
//! All configuration comes from four environment variables, read once at
//! startup and immutable for the process lifetime:
//!
//! - `API_ID` — Telegram developer API id (integer)
//! - `API_HASH` — Telegram developer API hash
//! - `SESSION_STRING` — base64-encoded saved session for the account
//! - `API_KEY` — static bearer token expected from HTTP callers
//!
//! Absence of any variable is a fatal startup error; the server never
//! starts with partial credentials.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Names of the required environment variables, in reporting order.
pub const REQUIRED_VARS: &[&str] = &["API_ID", "API_HASH", "SESSION_STRING", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {0}")]
    MissingVars(String),

    #[error("API_ID must be an integer, got {0:?}")]
    InvalidApiId(String),

    #[error("SESSION_STRING is not valid base64")]
    InvalidSessionString,
}

/// Immutable credential set for the process.
///
/// Secrets are wrapped in [`SecretString`] so they never leak through
/// `Debug` formatting or log output.
#[derive(Clone)]
pub struct Credentials {
    pub api_id: i32,
    api_hash: SecretString,
    session_string: SecretString,
    api_key: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| lookup(name).map_or(true, |v| v.is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing.join(", ")));
        }

        // The filter above guarantees presence; fall back to empty rather
        // than panicking if a lookup is not pure.
        let var = |name: &str| lookup(name).unwrap_or_default();

        let raw_api_id = var("API_ID");
        let api_id: i32 = raw_api_id
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidApiId(raw_api_id.clone()))?;

        let session_string = var("SESSION_STRING");
        // Validate eagerly so a corrupt session aborts startup, not the
        // first request.
        BASE64
            .decode(session_string.trim())
            .map_err(|_| ConfigError::InvalidSessionString)?;

        Ok(Self {
            api_id,
            api_hash: var("API_HASH").into(),
            session_string: session_string.into(),
            api_key: var("API_KEY").into(),
        })
    }

    pub fn api_hash(&self) -> &str {
        self.api_hash.expose_secret()
    }

    /// Decode the base64 session string into raw session bytes.
    pub fn session_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        BASE64
            .decode(self.session_string.expose_secret().trim())
            .map_err(|_| ConfigError::InvalidSessionString)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_env(name: &str) -> Option<String> {
        match name {
            "API_ID" => Some("12345".into()),
            "API_HASH" => Some("0123456789abcdef".into()),
            // base64 of "session-bytes"
            "SESSION_STRING" => Some("c2Vzc2lvbi1ieXRlcw==".into()),
            "API_KEY" => Some("sekrit".into()),
            _ => None,
        }
    }

    #[test]
    fn loads_complete_credentials() {
        let creds = Credentials::from_lookup(full_env).unwrap();
        assert_eq!(creds.api_id, 12345);
        assert_eq!(creds.api_hash(), "0123456789abcdef");
        assert_eq!(creds.api_key(), "sekrit");
        assert_eq!(creds.session_bytes().unwrap(), b"session-bytes");
    }

    #[test]
    fn reports_all_missing_vars() {
        let err = Credentials::from_lookup(|_| None).unwrap_err();
        let msg = err.to_string();
        for name in REQUIRED_VARS {
            assert!(msg.contains(name), "expected {name} in: {msg}");
        }
    }

    #[test]
    fn empty_var_counts_as_missing() {
        let err = Credentials::from_lookup(|name| match name {
            "API_KEY" => Some(String::new()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn rejects_non_numeric_api_id() {
        let err = Credentials::from_lookup(|name| match name {
            "API_ID" => Some("not-a-number".into()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiId(_)));
    }

    #[test]
    fn rejects_bad_session_base64() {
        let err = Credentials::from_lookup(|name| match name {
            "SESSION_STRING" => Some("%%% not base64 %%%".into()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSessionString));
    }

    #[test]
    fn debug_hides_secrets() {
        let creds = Credentials::from_lookup(full_env).unwrap();
        let dump = format!("{creds:?}");
        assert!(!dump.contains("sekrit"));
        assert!(!dump.contains("0123456789abcdef"));
    }
}
