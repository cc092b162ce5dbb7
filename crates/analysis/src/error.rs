use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The scoring endpoint's daily quota ran out mid-pass. Reported
    /// distinctly so the operator knows the pass stopped early and why.
    #[error("enrichment pass aborted: {0}")]
    DailyLimitReached(#[source] chatter_sentiment::EnrichError),

    #[error("store error: {0}")]
    StoreError(#[from] chatter_store::StoreError),
}

impl AnalysisError {
    /// Whether this is the expected quota-exhausted abort rather than a
    /// collaborator failure
    #[must_use]
    pub const fn is_daily_limit(&self) -> bool {
        matches!(self, Self::DailyLimitReached(_))
    }
}
