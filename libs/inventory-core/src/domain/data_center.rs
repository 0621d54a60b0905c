use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ScopedRecord, SqliteQuery, require_name};
use crate::{CoreError, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataCenter {
    pub id: String,
    pub name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataCenterInput {
    pub name: String,
}

impl ScopedRecord for DataCenter {
    type Input = DataCenterInput;

    const TABLE: &'static str = "data_centers";
    const ID_PREFIX: &'static str = "dc";
    const NOUN: &'static str = "Data center";
    const FIELDS: &'static [&'static str] = &["name"];

    fn validate(input: &Self::Input) -> Result<(), CoreError> {
        require_name(&input.name)
    }

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        query.bind(input.name)
    }
}
