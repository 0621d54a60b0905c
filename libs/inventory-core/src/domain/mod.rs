use sqlx::{
    FromRow, Sqlite,
    query::Query,
    sqlite::{SqliteArguments, SqliteRow},
};

use crate::CoreError;

pub mod data_center;
pub mod device;
pub mod rack;
pub mod room;
pub mod service;
pub mod user;

pub use data_center::{DataCenter, DataCenterInput};
pub use device::{Device, DeviceInput};
pub use rack::{Rack, RackInput};
pub use room::{Room, RoomInput};
pub use service::{Service, ServiceInput};
pub use user::{Session, UserProfile};

/// A parameterized statement that still accepts binds.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A table whose rows are owned by one user and share the
/// list/get/create/update/delete statement shape.
///
/// `FIELDS` lists the mutable columns in the order `bind_fields` binds them.
/// `id`, `user_id` and the timestamps are managed by the store.
pub trait ScopedRecord: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    /// Body accepted by create and update (full replace).
    type Input: Send + 'static;

    const TABLE: &'static str;
    const ID_PREFIX: &'static str;
    /// Human readable name used in responses, e.g. "Device".
    const NOUN: &'static str;
    const FIELDS: &'static [&'static str];

    fn validate(input: &Self::Input) -> Result<(), CoreError>;

    fn bind_fields(input: Self::Input, query: SqliteQuery<'_>) -> SqliteQuery<'_>;
}

pub(crate) fn require_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }
    Ok(())
}
