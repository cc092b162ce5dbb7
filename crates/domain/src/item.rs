use crate::event::StreamEvent;
use serde::{Deserialize, Serialize};

/// One ingested record: raw text plus metadata and, once computed, the
/// transformed text and sentiment score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier assigned by the stream provider
    pub id: i64,

    /// Identifier of the authoring user
    pub user_id: i64,

    /// Text exactly as it arrived on the stream
    pub raw_text: String,

    /// Normalized, stopword-filtered text; `None` until an analysis pass
    /// computes it
    #[serde(default)]
    pub transformed_text: Option<String>,

    /// Sentiment score; label and probabilities are set together or not at
    /// all
    #[serde(default)]
    pub sentiment: Option<Sentiment>,

    /// Follower count of the authoring user at ingestion time
    #[serde(default)]
    pub user_followers: Option<u32>,

    /// Friend count of the authoring user at ingestion time
    #[serde(default)]
    pub user_friends: Option<u32>,
}

impl Item {
    /// Build an item from an accepted stream event. Only raw text and
    /// metadata are populated; transformation and scoring happen later.
    #[must_use]
    pub fn from_event(event: StreamEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            raw_text: event.text,
            transformed_text: None,
            sentiment: None,
            user_followers: Some(event.user_followers),
            user_friends: Some(event.user_friends),
        }
    }

    /// Whether this item has already been scored by the enricher
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.sentiment.is_some()
    }

    /// Follower/friend ratio of the authoring user. `None` when either
    /// count is missing or the friend count is zero (undefined ratio).
    #[must_use]
    pub fn follower_friend_ratio(&self) -> Option<f64> {
        let followers = self.user_followers?;
        let friends = self.user_friends?;
        if friends == 0 {
            return None;
        }
        Some(f64::from(followers) / f64::from(friends))
    }
}

/// External sentiment score attached to an [`Item`].
///
/// Probabilities are raw values in `[0, 1]` as returned by the scoring
/// endpoint; they are not re-normalized here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    /// Label reported by the scorer (e.g. "neg", "neutral", "pos")
    pub label: String,

    /// Negative probability
    pub negative: f64,

    /// Neutral probability
    pub neutral: f64,

    /// Positive probability
    pub positive: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_event() -> StreamEvent {
        StreamEvent {
            id: 42,
            user_id: 7,
            user_followers: 120,
            user_friends: 60,
            text: "hello stream".to_string(),
            lang: "en".to_string(),
            reshare: false,
        }
    }

    #[test]
    fn from_event_copies_fields_and_leaves_derived_state_empty() {
        let item = Item::from_event(sample_event());
        assert_eq!(item.id, 42);
        assert_eq!(item.user_id, 7);
        assert_eq!(item.raw_text, "hello stream");
        assert_eq!(item.transformed_text, None);
        assert!(!item.is_scored());
        assert_eq!(item.user_followers, Some(120));
        assert_eq!(item.user_friends, Some(60));
    }

    #[test]
    fn follower_friend_ratio_is_undefined_for_zero_friends() {
        let mut item = Item::from_event(sample_event());
        assert_eq!(item.follower_friend_ratio(), Some(2.0));

        item.user_friends = Some(0);
        assert_eq!(item.follower_friend_ratio(), None);

        item.user_friends = None;
        assert_eq!(item.follower_friend_ratio(), None);
    }

    #[test]
    fn item_round_trips_through_json() {
        let mut item = Item::from_event(sample_event());
        item.sentiment = Some(Sentiment {
            label: "pos".to_string(),
            negative: 0.1,
            neutral: 0.2,
            positive: 0.7,
        });
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn item_deserializes_without_optional_fields() {
        let json = r#"{"id":1,"user_id":2,"raw_text":"x"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.transformed_text, None);
        assert_eq!(item.sentiment, None);
        assert_eq!(item.user_followers, None);
    }
}
