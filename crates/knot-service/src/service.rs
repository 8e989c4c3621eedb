use crate::error::{Result, ServiceError};
use jiff::Timestamp;
use knot_core::base62;
use knot_core::record::{Limits, NewUrlRecord, UrlRecord};
use knot_core::store::UrlStore;
use std::sync::Arc;
use tracing::{debug, trace};

/// The URL shortening service.
///
/// Wraps a [`UrlStore`] and coordinates id assignment, base-62 code
/// generation, persistence, and lookup. Each operation is a single
/// blocking call that either returns a result or fails with a typed
/// error; nothing is retried or swallowed.
///
/// `save` predicts the next id from the highest existing id before the
/// insert. The two steps are not one transaction, so a concurrent saver
/// may predict the same id; the store's unique short-code constraint
/// then fails the later insert with a conflict rather than storing a
/// diverged code.
#[derive(Debug, Clone)]
pub struct UrlService<S> {
    store: Arc<S>,
    limits: Limits,
}

impl<S: UrlStore> UrlService<S> {
    /// Creates a service with default validation limits.
    pub fn new(store: S) -> Self {
        Self::with_limits(store, Limits::default())
    }

    /// Creates a service with the given validation limits.
    pub fn with_limits(store: S, limits: Limits) -> Self {
        Self {
            store: Arc::new(store),
            limits,
        }
    }

    /// Shortens a URL and persists the mapping.
    ///
    /// The short code is the base-62 encoding of the predicted next id:
    /// highest existing id plus one, or 1 for an empty store.
    pub async fn save(&self, full_url: &str) -> Result<UrlRecord> {
        self.limits.check_full_url(full_url)?;

        let next_id = match self.store.find_highest_id().await? {
            Some(latest) => latest.id + 1,
            None => 1,
        };
        let short_url = base62::encode(next_id);
        trace!(id = next_id, code = %short_url, "generated short code");

        let new = NewUrlRecord::validated(full_url, short_url, Timestamp::now(), &self.limits)?;
        let record = self.store.insert(new).await?;
        debug!(id = record.id, code = %record.short_url, url = %record.full_url, "saved url");

        Ok(record)
    }

    /// Resolves a short code to its record.
    pub async fn find_by_short_url(&self, code: &str) -> Result<UrlRecord> {
        trace!(code = %code, "resolving short code");

        match self.store.find_by_short_code(code).await? {
            Some(record) => {
                debug!(code = %code, url = %record.full_url, "resolved short code");
                Ok(record)
            }
            None => Err(ServiceError::NotFound(code.to_string())),
        }
    }

    /// Looks up a record by its original URL. Absence is not an error.
    pub async fn find_by_full_url(&self, full_url: &str) -> Result<Option<UrlRecord>> {
        Ok(self.store.find_by_full_url(full_url).await?)
    }

    /// Returns every record.
    pub async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.store.find_all().await?)
    }
}
