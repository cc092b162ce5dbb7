//! # Chatter Text
//!
//! Pure text-transform pipeline: the [`Normalizer`] that prepares raw
//! stream text for counting and scoring, the whitespace [`tokenize`]r, and
//! the injected-list [`StopwordFilter`].
//!
//! Everything in this crate is deterministic and total; no I/O, no errors.

mod normalize;
mod stopwords;

pub use normalize::{tokenize, Normalizer};
pub use stopwords::StopwordFilter;
