//! # Chatter Ingest
//!
//! Consumes the external event stream and writes accepted events through a
//! bounded corpus store.
//!
//! [`EventSource`] is the stream collaborator boundary; [`ChannelSource`]
//! adapts a tokio channel (the live delivery shape) and [`ReplaySource`]
//! replays captured events from memory or a JSONL file. [`StreamIngestor`]
//! runs the accept/insert loop until the collection fills up, the source
//! runs dry, or the caller stops it.

mod error;
mod ingestor;
mod source;

pub use error::{IngestError, Result};
pub use ingestor::{
    IngestSummary, IngestorConfig, IngestorHandle, IngestorState, StopReason, StreamIngestor,
};
pub use source::{ChannelSource, EventSource, ReplaySource};
