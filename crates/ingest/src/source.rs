use crate::error::Result;
use async_trait::async_trait;
use chatter_domain::StreamEvent;
use std::collections::VecDeque;
use std::path::Path;
use tokio::sync::mpsc;

/// Stream collaborator boundary.
///
/// `next_event` futures must be cancel-safe: the ingestor polls them inside
/// a `select!` loop and may drop an unresolved poll when it is stopped.
#[async_trait]
pub trait EventSource: Send {
    /// Next inbound event, or `None` once the stream is exhausted or
    /// disconnected.
    async fn next_event(&mut self) -> Option<StreamEvent>;

    /// Release the subscription. After this returns, no further events are
    /// delivered.
    async fn detach(&mut self) {}
}

/// Adapts a tokio mpsc channel fed by an external stream client.
pub struct ChannelSource {
    rx: mpsc::Receiver<StreamEvent>,
}

impl ChannelSource {
    #[must_use]
    pub fn new(rx: mpsc::Receiver<StreamEvent>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl EventSource for ChannelSource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        self.rx.recv().await
    }

    async fn detach(&mut self) {
        self.rx.close();
    }
}

/// Replays a fixed batch of events, used for tests and offline runs over
/// captured streams.
#[derive(Debug, Default)]
pub struct ReplaySource {
    events: VecDeque<StreamEvent>,
}

impl ReplaySource {
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = StreamEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Load events from a JSONL file, one event object per line. Blank
    /// lines are skipped; a malformed line is an error.
    pub async fn from_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref()).await?;
        let mut events = VecDeque::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            events.push_back(serde_json::from_str(line)?);
        }
        log::info!(
            "loaded {} events from {}",
            events.len(),
            path.as_ref().display()
        );
        Ok(Self { events })
    }

    /// Remaining undelivered events
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl EventSource for ReplaySource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        self.events.pop_front()
    }

    async fn detach(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(id: i64) -> StreamEvent {
        StreamEvent {
            id,
            user_id: 1,
            user_followers: 0,
            user_friends: 0,
            text: "t".to_string(),
            lang: "en".to_string(),
            reshare: false,
        }
    }

    #[tokio::test]
    async fn replay_source_delivers_in_order_then_ends() {
        let mut source = ReplaySource::new([event(1), event(2)]);
        assert_eq!(source.next_event().await.unwrap().id, 1);
        assert_eq!(source.next_event().await.unwrap().id, 2);
        assert!(source.next_event().await.is_none());
    }

    #[tokio::test]
    async fn replay_source_detach_drops_the_rest() {
        let mut source = ReplaySource::new([event(1), event(2)]);
        source.detach().await;
        assert_eq!(source.remaining(), 0);
        assert!(source.next_event().await.is_none());
    }

    #[tokio::test]
    async fn jsonl_round_trip_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let mut lines = Vec::new();
        for id in [5, 6] {
            lines.push(serde_json::to_string(&event(id)).unwrap());
        }
        tokio::fs::write(&path, format!("{}\n\n{}\n", lines[0], lines[1]))
            .await
            .unwrap();

        let mut source = ReplaySource::from_jsonl(&path).await.unwrap();
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_event().await.unwrap().id, 5);
    }

    #[tokio::test]
    async fn channel_source_ends_when_sender_drops() {
        let (tx, rx) = mpsc::channel(4);
        let mut source = ChannelSource::new(rx);
        tx.send(event(9)).await.unwrap();
        drop(tx);
        assert_eq!(source.next_event().await.unwrap().id, 9);
        assert!(source.next_event().await.is_none());
    }
}
