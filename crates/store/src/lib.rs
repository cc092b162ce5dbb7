//! # Chatter Store
//!
//! Capacity-bounded persistence for ingested items.
//!
//! [`CollectionStore`] is the document-store collaborator boundary: count,
//! insert, scan, replace-by-id, and a distinct-user query. [`MemoryCollection`]
//! is the in-process driver used by tests and the CLI, with JSON load/save.
//! [`BoundedCorpusStore`] wraps a driver with the atomic capacity check that
//! the ingest path relies on.

mod bounded;
mod collection;
mod error;
mod memory;

pub use bounded::BoundedCorpusStore;
pub use collection::CollectionStore;
pub use error::{Result, StoreError};
pub use memory::MemoryCollection;
