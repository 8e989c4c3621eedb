use async_trait::async_trait;
use dashmap::DashMap;
use knot_core::record::{NewUrlRecord, UrlRecord};
use knot_core::store::{Result, UrlStore};
use knot_core::StoreError;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of the store using DashMap, keyed by id.
///
/// Ids come from an atomic sequence starting at 1, mirroring a
/// relational auto-increment column. Lookups by short code or full URL
/// scan the map; this backend is meant for tests and small embedded
/// deployments, not large datasets.
#[derive(Debug)]
pub struct InMemoryStore {
    rows: DashMap<u64, UrlRecord>,
    id_seq: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty store with ids starting at 1.
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            id_seq: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn insert(&self, new: NewUrlRecord) -> Result<UrlRecord> {
        // Check-and-insert: reject a taken short code, matching the
        // unique index of the relational backend.
        if self
            .rows
            .iter()
            .any(|entry| entry.short_url == new.short_url)
        {
            return Err(StoreError::Conflict(new.short_url));
        }

        let id = self.id_seq.fetch_add(1, Ordering::SeqCst);
        let record = UrlRecord {
            id,
            full_url: new.full_url,
            short_url: new.short_url,
            created_at: new.created_at,
        };
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        Ok(self
            .rows
            .iter()
            .find(|entry| entry.short_url == code)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<UrlRecord>> {
        Ok(self
            .rows
            .iter()
            .find(|entry| entry.full_url == full_url)
            .map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        let mut records: Vec<UrlRecord> = self.rows.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn find_highest_id(&self) -> Result<Option<UrlRecord>> {
        Ok(self
            .rows
            .iter()
            .max_by_key(|entry| entry.id)
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn new_record(full_url: &str, short_url: &str) -> NewUrlRecord {
        NewUrlRecord {
            full_url: full_url.to_string(),
            short_url: short_url.to_string(),
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_from_one() {
        let store = InMemoryStore::new();

        let first = store
            .insert(new_record("https://one.example", "b"))
            .await
            .unwrap();
        let second = store
            .insert(new_record("https://two.example", "c"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_short_code() {
        let store = InMemoryStore::new();

        store
            .insert(new_record("https://one.example", "b"))
            .await
            .unwrap();

        let err = store
            .insert(new_record("https://two.example", "b"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_short_code_returns_the_record() {
        let store = InMemoryStore::new();

        store
            .insert(new_record("https://example.com", "b"))
            .await
            .unwrap();

        let found = store.find_by_short_code("b").await.unwrap().unwrap();
        assert_eq!(found.full_url, "https://example.com");

        assert!(store.find_by_short_code("zz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_full_url_returns_the_record() {
        let store = InMemoryStore::new();

        store
            .insert(new_record("https://example.com", "b"))
            .await
            .unwrap();

        let found = store
            .find_by_full_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.short_url, "b");

        assert!(store
            .find_by_full_url("https://never.example")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_all_returns_records_in_id_order() {
        let store = InMemoryStore::new();

        for (url, code) in [
            ("https://one.example", "b"),
            ("https://two.example", "c"),
            ("https://three.example", "d"),
        ] {
            store.insert(new_record(url, code)).await.unwrap();
        }

        let all = store.find_all().await.unwrap();
        let ids: Vec<u64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn find_highest_id_on_empty_store() {
        let store = InMemoryStore::new();
        assert!(store.find_highest_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_highest_id_returns_latest_record() {
        let store = InMemoryStore::new();

        store
            .insert(new_record("https://one.example", "b"))
            .await
            .unwrap();
        store
            .insert(new_record("https://two.example", "c"))
            .await
            .unwrap();

        let latest = store.find_highest_id().await.unwrap().unwrap();
        assert_eq!(latest.id, 2);
        assert_eq!(latest.short_url, "c");
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(NewUrlRecord {
                        full_url: format!("https://example{i}.com"),
                        short_url: format!("c{i:03}"),
                        created_at: Timestamp::now(),
                    })
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 16);
    }
}
