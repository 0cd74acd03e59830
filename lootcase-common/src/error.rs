// ================================================================
// File: lootcase-common/src/error.rs
// ================================================================

use chrono::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    // Reward flow:
    #[error("On cooldown: {}s remaining", .remaining.num_seconds())]
    OnCooldown { remaining: Duration },

    #[error("Empty prize pool: {0}")]
    EmptyPool(String),

    #[error("Unknown case: {0}")]
    UnknownCase(String),

    #[error("Unknown subject: {0}")]
    UnknownSubject(Uuid),

    #[error("Insufficient balance: have {balance}, need {price}")]
    InsufficientBalance { balance: i64, price: i64 },

    // Admin catalog validation:
    #[error("Invalid prize: {0}")]
    InvalidPrize(String),

    #[error("Invalid case: {0}")]
    InvalidCase(String),

    // Infrastructure:
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Errors the end user can act on (wait, earn more coins). Everything
    /// else is an operator or integration problem.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::OnCooldown { .. } | Error::InsufficientBalance { .. })
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Parse(format!("base64: {}", err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
