//! # Chatter Analysis
//!
//! Read-driven aggregation over a stored corpus: word frequencies,
//! sentiment probability sums, per-user averages, and the cumulative
//! follower/friend ratio series.
//!
//! All passes run over a snapshot of the store, tolerate partial prior
//! state, and can be re-run. Per-item enrichment failures are logged and
//! skipped; only the scorer's daily limit aborts a pass.

mod engine;
mod error;
mod frequency;
mod summary;

pub use engine::AggregationEngine;
pub use error::{AnalysisError, Result};
pub use frequency::FrequencyTable;
pub use summary::{CumulativeSeries, SentimentDistribution, UserSummary};
