use std::error::Error as StdError;

// Declare modules
pub mod adapters;
pub mod domain;
pub mod identity;
pub mod ids;
pub mod password;

pub use adapters::sqlite_store::SqliteStore;
pub use identity::{CredentialVerifier, LegacyBearerVerifier, SessionTokenVerifier};
pub use ids::{IdGenerator, MonotonicIdGenerator};
pub use sqlx::Error as SqlxError;

/// Integer identifier of a row in `users`; every scoped row carries one.
pub type UserId = i64;

/// Owner used when no credential is presented in legacy mode.
pub const DEFAULT_USER_ID: UserId = 0;

// Common error type for the inventory core
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("Storage unavailable: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
    #[error("Internal error: {0}")]
    Internal(String),
}

// SQLITE_CANTOPEN, raised when the database file cannot be opened or created
const SQLITE_CANTOPEN: &str = "14";

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => CoreError::Connection(err),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CoreError::Conflict("Resource already exists".into())
            }
            sqlx::Error::Database(db) if db.code().as_deref() == Some(SQLITE_CANTOPEN) => {
                CoreError::Connection(err)
            }
            _ => CoreError::Storage(Box::new(err)),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for CoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        CoreError::Storage(Box::new(err))
    }
}

impl CoreError {
    /// True for failures the caller cannot fix by changing the request.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            CoreError::Connection(_) | CoreError::Storage(_) | CoreError::Internal(_)
        )
    }
}
