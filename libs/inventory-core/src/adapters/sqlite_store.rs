use std::{path::Path, str::FromStr, sync::Arc};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::{
    CoreError, IdGenerator, MonotonicIdGenerator, UserId,
    domain::ScopedRecord,
};

// Millisecond-precision RFC 3339 timestamp, evaluated once per statement
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

// Largest numeric id suffix across the scoped tables
const MAX_ID_SUFFIX: &str = "SELECT COALESCE(MAX(CAST(substr(id, instr(id, '-') + 1) AS INTEGER)), 0) FROM (\
    SELECT id FROM data_centers UNION ALL SELECT id FROM rooms UNION ALL \
    SELECT id FROM racks UNION ALL SELECT id FROM services UNION ALL SELECT id FROM devices)";

/// SQLite implementation of the entity store.
///
/// Each operation checks a connection out of the pool for its own duration; writes
/// that return the stored row run the write and the confirming read in one transaction.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    ids: Arc<dyn IdGenerator>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(CoreError::Connection)?
            .create_if_missing(true);
        Self::connect_with(options, max_connections).await
    }

    /// Same as [`SqliteStore::connect`] for a plain file path.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, max_connections).await
    }

    pub async fn connect_with(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, CoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(CoreError::Connection)?;

        info!("Applying database migrations...");
        MIGRATOR.run(&pool).await?;
        info!("Migrations applied successfully.");

        // Ids stay ahead of stored rows even if the clock moved back since they were issued
        let last_id: i64 = sqlx::query_scalar(MAX_ID_SUFFIX).fetch_one(&pool).await?;
        let ids = MonotonicIdGenerator::resume_after(u64::try_from(last_id).unwrap_or(0));

        Ok(Self {
            pool,
            ids: Arc::new(ids),
        })
    }

    /// Replaces the identifier source, e.g. with a deterministic one in tests.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All rows of `E` owned by `owner`, newest first.
    #[tracing::instrument(skip(self), fields(table = E::TABLE), err)]
    pub async fn list<E: ScopedRecord>(&self, owner: UserId) -> Result<Vec<E>, CoreError> {
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            E::TABLE
        );
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Rows owned by someone else are reported exactly like missing ones.
    #[tracing::instrument(skip(self), fields(table = E::TABLE), err)]
    pub async fn get<E: ScopedRecord>(&self, id: &str, owner: UserId) -> Result<E, CoreError> {
        sqlx::query_as::<_, E>(&select_owned_sql::<E>())
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found::<E>)
    }

    #[tracing::instrument(skip(self, input), fields(table = E::TABLE, id = tracing::field::Empty), err)]
    pub async fn create<E: ScopedRecord>(
        &self,
        input: E::Input,
        owner: UserId,
    ) -> Result<E, CoreError> {
        E::validate(&input)?;
        let id = self.ids.next_id(E::ID_PREFIX);
        tracing::Span::current().record("id", id.as_str());

        let placeholders = vec!["?"; E::FIELDS.len()].join(", ");
        let insert = format!(
            "INSERT INTO {} (id, {}, user_id) VALUES (?, {placeholders}, ?)",
            E::TABLE,
            E::FIELDS.join(", ")
        );
        let select = select_owned_sql::<E>();

        let mut tx = self.pool.begin().await?;
        E::bind_fields(input, sqlx::query(&insert).bind(id.as_str()))
            .bind(owner)
            .execute(&mut *tx)
            .await?;
        let created = sqlx::query_as::<_, E>(&select)
            .bind(id.as_str())
            .bind(owner)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(created)
    }

    /// Replaces every mutable column and bumps `updated_at`.
    #[tracing::instrument(skip(self, input), fields(table = E::TABLE), err)]
    pub async fn update<E: ScopedRecord>(
        &self,
        id: &str,
        input: E::Input,
        owner: UserId,
    ) -> Result<E, CoreError> {
        E::validate(&input)?;
        let assignments = E::FIELDS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let update = format!(
            "UPDATE {} SET {assignments}, updated_at = {NOW} WHERE id = ? AND user_id = ?",
            E::TABLE
        );
        let select = select_owned_sql::<E>();

        let mut tx = self.pool.begin().await?;
        let result = E::bind_fields(input, sqlx::query(&update))
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(not_found::<E>());
        }
        let updated = sqlx::query_as::<_, E>(&select)
            .bind(id)
            .bind(owner)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Hard delete. A second delete of the same id is NotFound.
    #[tracing::instrument(skip(self), fields(table = E::TABLE), err)]
    pub async fn delete<E: ScopedRecord>(&self, id: &str, owner: UserId) -> Result<(), CoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found::<E>());
        }
        Ok(())
    }
}

fn select_owned_sql<E: ScopedRecord>() -> String {
    format!("SELECT * FROM {} WHERE id = ? AND user_id = ?", E::TABLE)
}

fn not_found<E: ScopedRecord>() -> CoreError {
    CoreError::NotFound(format!("{} not found", E::NOUN))
}
