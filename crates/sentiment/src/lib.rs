//! # Chatter Sentiment
//!
//! External sentiment scoring for stored items.
//!
//! The [`Enricher`] trait is the seam between the aggregation engine and
//! the scorer; [`SentimentEnricher`] is the HTTP implementation that talks
//! to the text-processing endpoint. Skip rules (empty text, already
//! scored) are outcomes, not errors; the error enum separates the
//! recoverable per-item failures from the fatal daily-limit signal.

mod enricher;
mod error;

pub use enricher::{EnrichOutcome, Enricher, EnricherConfig, SentimentEnricher};
pub use error::{EnrichError, Result};
