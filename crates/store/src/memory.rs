use crate::collection::CollectionStore;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use chatter_domain::Item;
use std::path::Path;
use std::sync::Mutex;

/// In-process collection driver backed by a `Vec`, with optional JSON
/// persistence. Used by tests and as the CLI's store while the pipeline is
/// driven from captured event files.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    items: Mutex<Vec<Item>>,
}

impl MemoryCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with existing items (test convenience).
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Load a collection previously written by [`MemoryCollection::save`].
    /// A missing file yields an empty collection.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no collection file at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let data = tokio::fs::read_to_string(path).await?;
        let items: Vec<Item> = serde_json::from_str(&data)?;
        log::info!("loaded {} items from {}", items.len(), path.display());
        Ok(Self::with_items(items))
    }

    /// Persist the collection as pretty-printed JSON.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = {
            let items = self.lock()?;
            serde_json::to_string_pretty(&*items)?
        };
        tokio::fs::write(path.as_ref(), data).await?;
        log::info!("saved collection to {}", path.as_ref().display());
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Item>>> {
        self.items
            .lock()
            .map_err(|_| StoreError::Other("collection lock poisoned".to_string()))
    }
}

#[async_trait]
impl CollectionStore for MemoryCollection {
    async fn count(&self) -> Result<u64> {
        Ok(self.lock()?.len() as u64)
    }

    async fn insert_one(&self, item: Item) -> Result<()> {
        self.lock()?.push(item);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.lock()?.clone())
    }

    async fn replace_one(&self, item: &Item) -> Result<()> {
        let mut items = self.lock()?;
        match items.iter_mut().find(|stored| stored.id == item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(item.id)),
        }
    }

    async fn distinct_user_ids(&self) -> Result<Vec<i64>> {
        let items = self.lock()?;
        let mut seen = std::collections::HashSet::new();
        let mut ids = Vec::new();
        for item in items.iter() {
            if seen.insert(item.user_id) {
                ids.push(item.user_id);
            }
        }
        Ok(ids)
    }
}
