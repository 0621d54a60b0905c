use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// How the `Authorization` header is turned into a user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Bearer tokens issued by `/auth/login`; anything else is 401.
    #[default]
    Session,
    /// The header carries the bare user id; missing or garbage means user 0.
    Legacy,
}

/// Everything the service needs at startup, passed explicitly into `AppState`.
///
/// Each field is read from the upper-cased environment variable of the same name
/// (`DATABASE_URL`, `BIND_ADDR`, `AUTH_MODE`) except `max_connections`, which
/// comes from `DB_MAX_CONNECTIONS`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default = "default_max_connections", rename = "db_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://data_center.db".to_string()
}
fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8001))
}
fn default_max_connections() -> u32 {
    5
}

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded by the caller).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if config.max_connections == 0 {
            return Err(ConfigError::Message(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        Ok(config)
    }
}
