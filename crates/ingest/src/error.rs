use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("store error: {0}")]
    StoreError(#[from] chatter_store::StoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("malformed event record: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("ingest task failed: {0}")]
    TaskFailed(String),
}
