use crate::error::StoreError;
use crate::record::{NewUrlRecord, UrlRecord};
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable storage for URL mappings.
///
/// Implementations assign the surrogate key on insert; ids are unique
/// and strictly increasing for as long as the store lives. Records are
/// never updated or deleted through this trait.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Persists a new record and returns it with the store-assigned id.
    ///
    /// Returns [`StoreError::Conflict`] if the short code is already
    /// taken.
    async fn insert(&self, new: NewUrlRecord) -> Result<UrlRecord>;

    /// Looks up the record with the given short code.
    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// Looks up a record by its original URL.
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<UrlRecord>>;

    /// Returns every record. Backends return id order.
    async fn find_all(&self) -> Result<Vec<UrlRecord>>;

    /// Returns the record with the largest id, if any.
    ///
    /// The service layer uses this to predict the next id before an
    /// insert.
    async fn find_highest_id(&self) -> Result<Option<UrlRecord>>;
}
