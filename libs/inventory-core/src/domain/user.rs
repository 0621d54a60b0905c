use serde::{Deserialize, Serialize};

use crate::UserId;

/// Public view of a user row. The password hash and session token never leave the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: UserId,
    pub uuid: String,
    pub username: String,
    #[serde(rename = "userLevel")]
    #[sqlx(rename = "userLevel")]
    pub user_level: String,
}

/// Issued on login; the token is presented back as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    #[serde(rename = "userLevel")]
    pub user_level: String,
}

// Level assigned to self-registered accounts
pub const DEFAULT_USER_LEVEL: &str = "user";
