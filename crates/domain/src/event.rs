use serde::{Deserialize, Serialize};

/// One inbound event as delivered by the stream collaborator.
///
/// The ingestor inspects `lang` and `reshare` to decide acceptance; the
/// remaining fields become the stored [`crate::Item`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamEvent {
    /// Unique event identifier
    pub id: i64,

    /// Identifier of the authoring user
    pub user_id: i64,

    /// Follower count of the authoring user
    pub user_followers: u32,

    /// Friend count of the authoring user
    pub user_friends: u32,

    /// Raw event text
    pub text: String,

    /// Declared language tag (e.g. "en")
    pub lang: String,

    /// Whether this event is a reshare/duplicate of another event
    #[serde(default)]
    pub reshare: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reshare_defaults_to_false() {
        let json = r#"{"id":1,"user_id":2,"user_followers":3,"user_friends":4,"text":"t","lang":"en"}"#;
        let event: StreamEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.reshare, false);
        assert_eq!(event.lang, "en");
    }
}
