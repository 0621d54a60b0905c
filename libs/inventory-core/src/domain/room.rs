use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScopedRecord, SqliteQuery, require_name};
use crate::{CoreError, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub data_center_id: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomInput {
    pub name: String,
    pub data_center_id: Option<String>,
}

impl ScopedRecord for Room {
    type Input = RoomInput;

    const TABLE: &'static str = "rooms";
    const ID_PREFIX: &'static str = "room";
    const NOUN: &'static str = "Room";
    const FIELDS: &'static [&'static str] = &["name", "data_center_id"];

    fn validate(input: &Self::Input) -> Result<(), CoreError> {
        require_name(&input.name)
    }

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        query.bind(input.name).bind(input.data_center_id)
    }
}
