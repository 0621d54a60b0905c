use async_trait::async_trait;
use tracing::debug;

use crate::{CoreError, DEFAULT_USER_ID, SqliteStore, UserId};

// Port for turning a request credential into the owner every store call is scoped by
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// `credential` is the raw `Authorization` header value, if any.
    async fn verify(&self, credential: Option<&str>) -> Result<UserId, CoreError>;
}

/// Strips an optional `Bearer ` scheme and surrounding whitespace.
pub fn bearer_token(credential: &str) -> &str {
    credential
        .strip_prefix("Bearer ")
        .unwrap_or(credential)
        .trim()
}

/// Compatibility verifier: the credential *is* the user id.
///
/// A missing or unparseable credential resolves to [`DEFAULT_USER_ID`] instead of
/// failing. Nothing is checked, so only run this behind a trusted proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBearerVerifier;

#[async_trait]
impl CredentialVerifier for LegacyBearerVerifier {
    async fn verify(&self, credential: Option<&str>) -> Result<UserId, CoreError> {
        let Some(credential) = credential else {
            return Ok(DEFAULT_USER_ID);
        };
        match bearer_token(credential).parse::<UserId>() {
            Ok(user_id) => Ok(user_id),
            Err(_) => {
                debug!("Unparseable legacy credential, using default user");
                Ok(DEFAULT_USER_ID)
            }
        }
    }
}

/// Resolves session tokens issued by [`SqliteStore::login`]. Anything else is rejected.
#[derive(Clone)]
pub struct SessionTokenVerifier {
    store: SqliteStore,
}

impl SessionTokenVerifier {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialVerifier for SessionTokenVerifier {
    async fn verify(&self, credential: Option<&str>) -> Result<UserId, CoreError> {
        let token = credential.map(bearer_token).unwrap_or_default();
        if token.is_empty() {
            return Err(CoreError::Unauthorized(
                "Missing or empty Authorization header".into(),
            ));
        }
        self.store
            .resolve_token(token)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("Invalid or expired session token".into()))
    }
}
