use crate::error::Result;
use async_trait::async_trait;
use chatter_domain::Item;

/// Document-store collaborator boundary for one named collection.
///
/// Implementations do not enforce any capacity ceiling; that is
/// [`crate::BoundedCorpusStore`]'s job. They also do not need to guard
/// against concurrent inserts racing the count, for the same reason.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Number of items currently stored
    async fn count(&self) -> Result<u64>;

    /// Append one item
    async fn insert_one(&self, item: Item) -> Result<()>;

    /// Snapshot of every stored item, in insertion order
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// Replace the stored item with the same id. Errors with
    /// [`crate::StoreError::NotFound`] when no item matches.
    async fn replace_one(&self, item: &Item) -> Result<()>;

    /// Distinct user ids, in first-seen order
    async fn distinct_user_ids(&self) -> Result<Vec<i64>>;
}
