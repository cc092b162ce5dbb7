//! # Chatter Domain
//!
//! Core data model shared by every crate in the workspace: the [`Item`]
//! stored in a collection, its optional [`Sentiment`] score, and the
//! [`StreamEvent`] payload delivered by the stream collaborator.

mod event;
mod item;

pub use event::StreamEvent;
pub use item::{Item, Sentiment};
