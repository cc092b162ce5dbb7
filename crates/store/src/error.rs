use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("collection {collection} is full (capacity {capacity})")]
    CapacityExceeded { collection: String, capacity: u64 },

    #[error("no stored item with id {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Whether this error is the expected capacity-reached terminal signal
    #[must_use]
    pub const fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}
