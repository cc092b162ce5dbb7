use crate::error::{IngestError, Result};
use crate::source::EventSource;
use chatter_domain::{Item, StreamEvent};
use chatter_store::BoundedCorpusStore;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Ingestor lifecycle. There is no way back to `Listening` once terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestorState {
    Idle,
    Listening,
    Terminated,
}

/// Why an ingest run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The collection reached its capacity ceiling. Expected terminal
    /// condition, not a failure.
    CapacityReached,
    /// The source delivered its last event
    SourceExhausted,
    /// The caller asked the ingestor to stop
    Stopped,
}

/// Outcome of a completed ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Events accepted and written to the store
    pub accepted: u64,
    /// Events dropped by the filter policy
    pub rejected: u64,
    pub reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct IngestorConfig {
    /// Language tag an event must declare to be accepted
    pub language: String,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

enum IngestorCommand {
    Stop,
}

/// Consumes an [`EventSource`] and writes accepted events through a
/// [`BoundedCorpusStore`] until a terminal condition is hit.
pub struct StreamIngestor;

impl StreamIngestor {
    /// Spawn the ingest loop. The returned handle observes state, can stop
    /// the run, and joins it for the [`IngestSummary`].
    #[must_use]
    pub fn start<S>(source: S, store: BoundedCorpusStore, config: IngestorConfig) -> IngestorHandle
    where
        S: EventSource + 'static,
    {
        let (state_tx, state_rx) = watch::channel(IngestorState::Idle);
        let (command_tx, command_rx) = mpsc::channel(4);

        let task = tokio::spawn(run_loop(source, store, config, state_tx, command_rx));

        IngestorHandle {
            state_rx,
            command_tx,
            task,
        }
    }
}

/// Handle to a running [`StreamIngestor`].
pub struct IngestorHandle {
    state_rx: watch::Receiver<IngestorState>,
    command_tx: mpsc::Sender<IngestorCommand>,
    task: JoinHandle<Result<IngestSummary>>,
}

impl IngestorHandle {
    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> IngestorState {
        *self.state_rx.borrow()
    }

    /// Stream of state changes
    #[must_use]
    pub fn state_stream(&self) -> watch::Receiver<IngestorState> {
        self.state_rx.clone()
    }

    /// Ask the ingestor to stop. Safe to call after termination.
    pub async fn stop(&self) {
        let _ = self.command_tx.send(IngestorCommand::Stop).await;
    }

    /// Wait for the run to finish and return its summary.
    pub async fn wait(self) -> Result<IngestSummary> {
        self.task
            .await
            .map_err(|e| IngestError::TaskFailed(e.to_string()))?
    }
}

/// Filter policy: accept only events in the target language that are not
/// reshares of another event.
fn accepts(event: &StreamEvent, config: &IngestorConfig) -> bool {
    event.lang == config.language && !event.reshare
}

async fn run_loop<S>(
    mut source: S,
    store: BoundedCorpusStore,
    config: IngestorConfig,
    state_tx: watch::Sender<IngestorState>,
    mut command_rx: mpsc::Receiver<IngestorCommand>,
) -> Result<IngestSummary>
where
    S: EventSource,
{
    let _ = state_tx.send(IngestorState::Listening);
    log::info!("listening for events on collection {}", store.name());

    let mut accepted = 0u64;
    let mut rejected = 0u64;

    let outcome = loop {
        tokio::select! {
            Some(IngestorCommand::Stop) = command_rx.recv() => {
                log::info!("stop requested, detaching from stream");
                break Ok(StopReason::Stopped);
            }
            maybe_event = source.next_event() => {
                let Some(event) = maybe_event else {
                    log::info!("event source exhausted");
                    break Ok(StopReason::SourceExhausted);
                };

                if !accepts(&event, &config) {
                    log::debug!("rejected event {} (lang={}, reshare={})",
                        event.id, event.lang, event.reshare);
                    rejected += 1;
                    continue;
                }

                match store.try_insert(Item::from_event(event)).await {
                    Ok(()) => accepted += 1,
                    Err(err) if err.is_capacity_exceeded() => {
                        log::info!(
                            "collection {} reached its capacity of {}, detaching",
                            store.name(),
                            store.capacity()
                        );
                        break Ok(StopReason::CapacityReached);
                    }
                    Err(err) => break Err(IngestError::from(err)),
                }
            }
        }
    };

    // Release the subscription before publishing the terminal state, so no
    // callback can arrive after observers see Terminated.
    source.detach().await;
    let _ = state_tx.send(IngestorState::Terminated);

    match outcome {
        Ok(reason) => {
            log::info!("ingest finished: {accepted} accepted, {rejected} rejected ({reason:?})");
            Ok(IngestSummary {
                accepted,
                rejected,
                reason,
            })
        }
        Err(err) => {
            log::error!("ingest aborted: {err}");
            Err(err)
        }
    }
}
