use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScopedRecord, SqliteQuery, require_name};
use crate::{CoreError, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rack {
    pub id: String,
    pub name: String,
    pub total_units: i64,
    pub room_id: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RackInput {
    pub name: String,
    pub total_units: i64,
    pub room_id: Option<String>,
}

impl ScopedRecord for Rack {
    type Input = RackInput;

    const TABLE: &'static str = "racks";
    const ID_PREFIX: &'static str = "rack";
    const NOUN: &'static str = "Rack";
    const FIELDS: &'static [&'static str] = &["name", "total_units", "room_id"];

    fn validate(input: &Self::Input) -> Result<(), CoreError> {
        require_name(&input.name)?;
        if input.total_units < 0 {
            return Err(CoreError::Validation(
                "total_units must not be negative".into(),
            ));
        }
        Ok(())
    }

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        query
            .bind(input.name)
            .bind(input.total_units)
            .bind(input.room_id)
    }
}
