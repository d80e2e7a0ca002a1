use std::time::Duration;

/// Error type shared by the model layer and the client.
///
/// Nothing in this workspace retries: every variant is handed back to the caller of
/// the manager method that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload did not match the schema (missing required field, unknown
    /// discriminator, wrong JSON type).
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP request itself failed (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Telegram answered with `"ok": false`.
    #[error("telegram api error {code}: {description}")]
    Api {
        code: i64,
        description: String,
        retry_after: Option<u64>,
        migrate_to_chat_id: Option<i64>,
    },

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
}

impl Error {
    /// Back-off hint sent with flood-control errors (429).
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Api {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Supergroup id to use instead, when a group was migrated.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        match self {
            Error::Api {
                migrate_to_chat_id, ..
            } => *migrate_to_chat_id,
            _ => None,
        }
    }

    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
