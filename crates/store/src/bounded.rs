use crate::collection::CollectionStore;
use crate::error::{Result, StoreError};
use chatter_domain::Item;
use std::sync::Arc;
use tokio::sync::Mutex;

struct Inner {
    backend: Arc<dyn CollectionStore>,
    name: String,
    capacity: u64,
    // Guards the check-and-increment: the count read, the backend insert,
    // and the increment form one critical section, so two deliveries can
    // never both observe `count < capacity` and push past the ceiling.
    count: Mutex<u64>,
}

/// Capacity-checked write path over a [`CollectionStore`], shared by the
/// ingestor (writes) and the aggregation engine (reads + write-back).
///
/// Cheap to clone; all clones observe the same collection and counter.
#[derive(Clone)]
pub struct BoundedCorpusStore {
    inner: Arc<Inner>,
}

impl BoundedCorpusStore {
    /// Attach to a collection. The current count is read from the backend
    /// once, so a partially filled collection keeps its remaining headroom.
    pub async fn new(
        backend: Arc<dyn CollectionStore>,
        name: impl Into<String>,
        capacity: u64,
    ) -> Result<Self> {
        let name = name.into();
        let current = backend.count().await?;
        log::info!("corpus store ready on collection {name}: {current}/{capacity} items");
        Ok(Self {
            inner: Arc::new(Inner {
                backend,
                name,
                capacity,
                count: Mutex::new(current),
            }),
        })
    }

    /// Collection name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Capacity ceiling
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.inner.capacity
    }

    /// Insert `item` unless the collection is full.
    ///
    /// Exactly `capacity` inserts can ever succeed, regardless of how
    /// concurrent deliveries interleave; every further attempt returns
    /// [`StoreError::CapacityExceeded`].
    pub async fn try_insert(&self, item: Item) -> Result<()> {
        let mut count = self.inner.count.lock().await;
        if *count >= self.inner.capacity {
            return Err(StoreError::CapacityExceeded {
                collection: self.inner.name.clone(),
                capacity: self.inner.capacity,
            });
        }
        self.inner.backend.insert_one(item).await?;
        *count += 1;
        log::debug!("inserted item {}/{}", *count, self.inner.capacity);
        Ok(())
    }

    /// Current item count
    pub async fn count(&self) -> u64 {
        *self.inner.count.lock().await
    }

    /// Snapshot of the stored corpus at call time. Writes that land after
    /// the snapshot are not reflected.
    pub async fn find_all(&self) -> Result<Vec<Item>> {
        self.inner.backend.find_all().await
    }

    /// Replace the stored item with the same id (enrichment write-back).
    pub async fn update_in_place(&self, item: &Item) -> Result<()> {
        self.inner.backend.replace_one(item).await
    }

    /// Distinct user ids in the collection's enumeration order
    pub async fn distinct_user_ids(&self) -> Result<Vec<i64>> {
        self.inner.backend.distinct_user_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCollection;
    use pretty_assertions::assert_eq;

    fn item(id: i64) -> Item {
        Item {
            id,
            user_id: id * 10,
            raw_text: format!("text {id}"),
            transformed_text: None,
            sentiment: None,
            user_followers: None,
            user_friends: None,
        }
    }

    async fn store_with_capacity(capacity: u64) -> BoundedCorpusStore {
        BoundedCorpusStore::new(Arc::new(MemoryCollection::new()), "test", capacity)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn sequential_inserts_stop_exactly_at_capacity() {
        let store = store_with_capacity(3).await;

        for id in 0..3 {
            store.try_insert(item(id)).await.unwrap();
        }
        let err = store.try_insert(item(3)).await.unwrap_err();
        assert!(err.is_capacity_exceeded());
        assert_eq!(store.count().await, 3);
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn concurrent_inserts_never_exceed_capacity() {
        const CAPACITY: u64 = 25;
        const ATTEMPTS: i64 = 100;

        let store = store_with_capacity(CAPACITY).await;
        let mut tasks = Vec::new();
        for id in 0..ATTEMPTS {
            let store = store.clone();
            tasks.push(tokio::spawn(async move { store.try_insert(item(id)).await }));
        }

        let mut ok = 0u64;
        let mut full = 0u64;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => ok += 1,
                Err(err) => {
                    assert!(err.is_capacity_exceeded());
                    full += 1;
                }
            }
        }

        assert_eq!(ok, CAPACITY);
        assert_eq!(full, ATTEMPTS as u64 - CAPACITY);
        assert_eq!(store.count().await, CAPACITY);
        assert_eq!(store.find_all().await.unwrap().len(), CAPACITY as usize);
    }

    #[tokio::test]
    async fn attach_reads_existing_count_from_backend() {
        let backend = MemoryCollection::with_items(vec![item(1), item(2)]);
        let store = BoundedCorpusStore::new(Arc::new(backend), "partial", 3)
            .await
            .unwrap();

        assert_eq!(store.count().await, 2);
        store.try_insert(item(3)).await.unwrap();
        assert!(store.try_insert(item(4)).await.unwrap_err().is_capacity_exceeded());
    }

    #[tokio::test]
    async fn update_in_place_reaches_the_backend() {
        let store = store_with_capacity(2).await;
        store.try_insert(item(1)).await.unwrap();

        let mut updated = item(1);
        updated.transformed_text = Some("clean".to_string());
        store.update_in_place(&updated).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all[0].transformed_text.as_deref(), Some("clean"));
    }
}
