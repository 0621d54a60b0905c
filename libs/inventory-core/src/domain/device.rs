use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScopedRecord, SqliteQuery, require_name};
use crate::{CoreError, UserId};

/// A piece of hardware mounted somewhere in the inventory.
///
/// `last_updated` is carried over from older schemas and never written by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    pub size: Option<i64>,
    pub status: String,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub installation_date: Option<String>,
    pub last_updated: Option<String>,
    pub notes: Option<String>,
    pub power_consumption: Option<i64>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update body. Unknown keys (id, timestamps echoed back by clients) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInput {
    pub name: String,
    pub model: Option<String>,
    pub size: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub installation_date: Option<String>,
    pub notes: Option<String>,
    pub power_consumption: Option<i64>,
}

fn default_status() -> String {
    "active".to_string()
}

impl ScopedRecord for Device {
    type Input = DeviceInput;

    const TABLE: &'static str = "devices";
    const ID_PREFIX: &'static str = "device";
    const NOUN: &'static str = "Device";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "model",
        "size",
        "status",
        "service_id",
        "service_name",
        "installation_date",
        "notes",
        "power_consumption",
    ];

    fn validate(input: &Self::Input) -> Result<(), CoreError> {
        require_name(&input.name)
    }

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        query
            .bind(input.name)
            .bind(input.model)
            .bind(input.size)
            .bind(input.status)
            .bind(input.service_id)
            .bind(input.service_name)
            .bind(input.installation_date)
            .bind(input.notes)
            .bind(input.power_consumption)
    }
}
