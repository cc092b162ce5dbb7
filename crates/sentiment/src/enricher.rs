use crate::error::{EnrichError, Result};
use async_trait::async_trait;
use chatter_domain::{Item, Sentiment};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Seam between the aggregation engine and the sentiment scorer.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Score `item`, setting its sentiment on success. Skip conditions are
    /// reported as outcomes; errors mean the item is left unscored.
    async fn enrich(&self, item: &mut Item) -> Result<EnrichOutcome>;
}

/// Result of one enrichment attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// The item was scored and its sentiment is now set
    Scored,
    /// Nothing left to score after transformation; item untouched
    SkippedEmpty,
    /// The item already carries a sentiment; re-runs leave it alone
    SkippedAlreadyScored,
}

#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Scoring endpoint URL
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://text-processing.com/api/sentiment/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the external scoring endpoint.
///
/// One POST per item, form-encoded `text=<transformed text>`; the response
/// is a JSON object with a `label` and a `probability` map.
#[derive(Debug, Clone)]
pub struct SentimentEnricher {
    client: reqwest::Client,
    endpoint: String,
}

impl SentimentEnricher {
    pub fn new(config: EnricherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    async fn score(&self, text: &str) -> Result<Sentiment> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text)])
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_REQUEST => return Err(EnrichError::BadRequest),
            StatusCode::SERVICE_UNAVAILABLE => return Err(EnrichError::DailyLimitReached),
            _ => {}
        }

        let body = response.error_for_status()?.text().await?;
        let parsed: ScoreResponse = serde_json::from_str(&body)?;

        Ok(Sentiment {
            label: parsed.label,
            negative: parsed.probability.neg,
            neutral: parsed.probability.neutral,
            positive: parsed.probability.pos,
        })
    }
}

#[async_trait]
impl Enricher for SentimentEnricher {
    async fn enrich(&self, item: &mut Item) -> Result<EnrichOutcome> {
        if item.is_scored() {
            return Ok(EnrichOutcome::SkippedAlreadyScored);
        }

        let Some(text) = item.transformed_text.as_deref() else {
            return Ok(EnrichOutcome::SkippedEmpty);
        };
        if text.trim().is_empty() {
            return Ok(EnrichOutcome::SkippedEmpty);
        }

        let sentiment = self.score(text).await?;
        log::debug!("scored item {} as {}", item.id, sentiment.label);
        // Single assignment keeps label and probabilities atomic.
        item.sentiment = Some(sentiment);
        Ok(EnrichOutcome::Scored)
    }
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    label: String,
    probability: ScoreProbability,
}

#[derive(Debug, Deserialize)]
struct ScoreProbability {
    neg: f64,
    neutral: f64,
    pos: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item_with_text(text: Option<&str>) -> Item {
        Item {
            id: 1,
            user_id: 2,
            raw_text: "raw".to_string(),
            transformed_text: text.map(str::to_string),
            sentiment: None,
            user_followers: None,
            user_friends: None,
        }
    }

    fn enricher() -> SentimentEnricher {
        SentimentEnricher::new(EnricherConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn skips_items_without_remaining_text() {
        let enricher = enricher();

        let mut missing = item_with_text(None);
        assert_eq!(
            enricher.enrich(&mut missing).await.unwrap(),
            EnrichOutcome::SkippedEmpty
        );

        let mut blank = item_with_text(Some("   "));
        assert_eq!(
            enricher.enrich(&mut blank).await.unwrap(),
            EnrichOutcome::SkippedEmpty
        );
        assert!(blank.sentiment.is_none());
    }

    #[tokio::test]
    async fn skips_items_that_already_carry_a_score() {
        let enricher = enricher();
        let mut item = item_with_text(Some("some text"));
        item.sentiment = Some(Sentiment {
            label: "pos".to_string(),
            negative: 0.1,
            neutral: 0.2,
            positive: 0.7,
        });

        let before = item.sentiment.clone();
        assert_eq!(
            enricher.enrich(&mut item).await.unwrap(),
            EnrichOutcome::SkippedAlreadyScored
        );
        assert_eq!(item.sentiment, before);
    }

    #[test]
    fn response_body_parses_into_sentiment_fields() {
        let body = r#"{"label":"neg","probability":{"neg":0.8,"neutral":0.15,"pos":0.05}}"#;
        let parsed: ScoreResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.label, "neg");
        assert_eq!(parsed.probability.neg, 0.8);
        assert_eq!(parsed.probability.pos, 0.05);
    }

    #[test]
    fn only_daily_limit_is_fatal() {
        assert!(EnrichError::DailyLimitReached.is_fatal());
        assert!(!EnrichError::BadRequest.is_fatal());
    }
}
