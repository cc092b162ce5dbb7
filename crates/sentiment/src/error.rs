use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnrichError>;

#[derive(Error, Debug)]
pub enum EnrichError {
    /// HTTP 400: the payload was empty or exceeded the endpoint's 80,000
    /// character ceiling. Recoverable; the item stays unscored.
    #[error("scoring endpoint rejected the request: no text provided or text over 80,000 characters")]
    BadRequest,

    /// HTTP 503: the endpoint's daily request quota is exhausted. Fatal to
    /// the whole enrichment pass; retrying immediately is futile.
    #[error("scoring endpoint daily request limit reached")]
    DailyLimitReached,

    /// Network or unexpected-status failure. Recoverable per item.
    #[error("transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// A 200 response whose body did not parse. Recoverable per item.
    #[error("malformed scoring response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl EnrichError {
    /// Whether this failure must abort the remaining enrichment run
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DailyLimitReached)
    }
}
