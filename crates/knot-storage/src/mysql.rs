use async_trait::async_trait;
use jiff::Timestamp;
use knot_core::record::{NewUrlRecord, UrlRecord};
use knot_core::store::{Result, UrlStore};
use knot_core::StoreError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the store contract.
///
/// The `urls` table owns id assignment through AUTO_INCREMENT; a unique
/// index on `short_url` turns a concurrent short-code collision into a
/// [`StoreError::Conflict`] instead of a silent duplicate. `created_at`
/// is stored as unix seconds.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StoreError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn row_to_record(row: &MySqlRow) -> Result<UrlRecord> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    let full_url: String = row.try_get("full_url").map_err(map_sqlx_error)?;
    let short_url: String = row.try_get("short_url").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(UrlRecord {
        id,
        full_url,
        short_url,
        created_at: parse_created_at(created_at_raw)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl UrlStore for MySqlStore {
    async fn insert(&self, new: NewUrlRecord) -> Result<UrlRecord> {
        let created_at = new.created_at.as_second();

        let result = sqlx::query(
            r#"
            INSERT INTO urls (full_url, short_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&new.full_url)
        .bind(&new.short_url)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        let done = match result {
            Ok(done) => done,
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Conflict(new.short_url));
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        Ok(UrlRecord {
            id: done.last_insert_id(),
            full_url: new.full_url,
            short_url: new.short_url,
            created_at: new.created_at,
        })
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM urls
            WHERE short_url = ?
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM urls
            WHERE full_url = ?
            LIMIT 1
            "#,
        )
        .bind(full_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM urls
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn find_highest_id(&self) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_url, short_url, created_at
            FROM urls
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }
}
