use tracing::{info, warn};
use uuid::Uuid;

use super::sqlite_store::SqliteStore;
use crate::{
    CoreError, UserId,
    domain::{Session, UserProfile, user::DEFAULT_USER_LEVEL},
    password::{hash_password, verify_password},
};

const PROFILE_COLUMNS: &str = "id, uuid, username, userLevel";

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: UserId,
    #[sqlx(rename = "passwordHash")]
    password_hash: String,
    #[sqlx(rename = "userLevel")]
    user_level: String,
    token: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Passwords are hashed byte for byte, surrounding whitespace included
fn present_secret(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn user_not_found() -> CoreError {
    CoreError::NotFound("User not found".into())
}

// Same answer for unknown user and wrong password
fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized("Invalid credentials".into())
}

impl SqliteStore {
    #[tracing::instrument(skip(self), err)]
    pub async fn current_user(&self, user_id: UserId) -> Result<UserProfile, CoreError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, UserProfile>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(user_not_found)
    }

    /// Renames the caller. Fails with Conflict when another user already has the name.
    #[tracing::instrument(skip(self), err)]
    pub async fn update_username(
        &self,
        user_id: UserId,
        new_username: Option<&str>,
    ) -> Result<UserProfile, CoreError> {
        let username = present(new_username)
            .ok_or_else(|| CoreError::Validation("Username is required".into()))?;

        // A deferred transaction that reads before writing gets SQLITE_BUSY without waiting
        // for the lock, so the write goes first. The unique index reports a taken name.
        let mut tx = self.pool().begin().await?;
        let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
            .bind(username)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| match CoreError::from(err) {
                CoreError::Conflict(_) => CoreError::Conflict("Username already exists".into()),
                other => other,
            })?;
        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        let sql = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?");
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("User {} renamed to {}", user_id, profile.username);
        Ok(profile)
    }

    /// Verifies `current_password` against the stored hash before storing a new salted hash.
    #[tracing::instrument(skip(self, current_password, new_password), err)]
    pub async fn update_password(
        &self,
        user_id: UserId,
        current_password: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<(), CoreError> {
        let (Some(current), Some(new)) =
            (present_secret(current_password), present_secret(new_password))
        else {
            return Err(CoreError::Validation(
                "Current and new password are required".into(),
            ));
        };

        let stored: String = sqlx::query_scalar("SELECT passwordHash FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(user_not_found)?;

        if !verify_password(current.to_owned(), stored).await? {
            warn!("Password change rejected for user {}: wrong current password", user_id);
            return Err(CoreError::Unauthorized(
                "Current password is incorrect".into(),
            ));
        }

        let new_hash = hash_password(new.to_owned()).await?;
        let result = sqlx::query("UPDATE users SET passwordHash = ? WHERE id = ?")
            .bind(new_hash)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, password), err)]
    pub async fn register(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<UserProfile, CoreError> {
        let (Some(username), Some(password)) = (present(username), present_secret(password))
        else {
            return Err(CoreError::Validation(
                "Username and password are required".into(),
            ));
        };

        let exists: Option<UserId> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;
        if exists.is_some() {
            return Err(CoreError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(password.to_owned()).await?;
        let sql = format!(
            "INSERT INTO users (uuid, username, passwordHash, userLevel, token) \
             VALUES (?, ?, ?, ?, NULL) RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, UserProfile>(&sql)
            .bind(Uuid::new_v4().to_string())
            .bind(username)
            .bind(password_hash)
            .bind(DEFAULT_USER_LEVEL)
            .fetch_one(self.pool())
            .await
            .map_err(|err| match CoreError::from(err) {
                CoreError::Conflict(_) => CoreError::Conflict("User already exists".into()),
                other => other,
            })?;

        info!("Registered user {} ({})", profile.username, profile.id);
        Ok(profile)
    }

    /// Checks the password and hands out the user's session token, issuing one if needed.
    #[tracing::instrument(skip(self, password), err)]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, CoreError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CoreError::Validation(
                "Username and password are required".into(),
            ));
        }

        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, passwordHash, userLevel, token FROM users WHERE username = ?",
        )
        .bind(username.trim())
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(invalid_credentials)?;

        if !verify_password(password.to_owned(), row.password_hash).await? {
            return Err(invalid_credentials());
        }

        // Keeps a token another login already stored; only the first writer's candidate sticks
        let token: String = match row.token {
            Some(token) => token,
            None => {
                sqlx::query_scalar(
                    "UPDATE users SET token = COALESCE(token, ?) WHERE id = ? RETURNING token",
                )
                .bind(format!("session-{}", Uuid::new_v4().simple()))
                .bind(row.id)
                .fetch_optional(self.pool())
                .await?
                .ok_or_else(invalid_credentials)?
            }
        };

        info!("User {} logged in", row.id);
        Ok(Session {
            token,
            user_id: row.id,
            user_level: row.user_level,
        })
    }

    /// Revokes a session token. Unknown tokens are ignored.
    #[tracing::instrument(skip_all, err)]
    pub async fn logout(&self, token: &str) -> Result<(), CoreError> {
        sqlx::query("UPDATE users SET token = NULL WHERE token = ?")
            .bind(token)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// User level behind a live session token, `None` when the token is unknown.
    #[tracing::instrument(skip_all, err)]
    pub async fn token_user_level(&self, token: &str) -> Result<Option<String>, CoreError> {
        let level = sqlx::query_scalar("SELECT userLevel FROM users WHERE token = ?")
            .bind(token)
            .fetch_optional(self.pool())
            .await?;
        Ok(level)
    }

    #[tracing::instrument(skip_all, err)]
    pub async fn resolve_token(&self, token: &str) -> Result<Option<UserId>, CoreError> {
        let user_id = sqlx::query_scalar("SELECT id FROM users WHERE token = ?")
            .bind(token)
            .fetch_optional(self.pool())
            .await?;
        Ok(user_id)
    }
}
