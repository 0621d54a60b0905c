use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScopedRecord, SqliteQuery, require_name};
use crate::{CoreError, UserId};

/// An application or business service that devices are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub owner: Option<String>,
    pub department: Option<String>,
    pub criticality: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub owner: Option<String>,
    pub department: Option<String>,
    pub criticality: Option<String>,
}

fn default_status() -> String {
    "Active".to_string()
}

impl ScopedRecord for Service {
    type Input = ServiceInput;

    const TABLE: &'static str = "services";
    const ID_PREFIX: &'static str = "service";
    const NOUN: &'static str = "Service";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "description",
        "status",
        "owner",
        "department",
        "criticality",
    ];

    fn validate(input: &Self::Input) -> Result<(), CoreError> {
        require_name(&input.name)
    }

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        query
            .bind(input.name)
            .bind(input.description)
            .bind(input.status)
            .bind(input.owner)
            .bind(input.department)
            .bind(input.criticality)
    }
}
