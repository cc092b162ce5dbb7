use crate::error::{AnalysisError, Result};
use crate::frequency::FrequencyTable;
use crate::summary::{CumulativeSeries, SentimentDistribution, UserSummary};
use chatter_domain::Item;
use chatter_sentiment::{EnrichOutcome, Enricher};
use chatter_store::BoundedCorpusStore;
use chatter_text::{tokenize, Normalizer, StopwordFilter};
use std::collections::HashMap;

/// How often long passes report progress
const PROGRESS_EVERY: usize = 50;

/// Read-driven aggregation passes over a stored corpus.
///
/// Each pass iterates a snapshot of the store and is safe to re-run over
/// partially processed state. The caller picks which passes to run.
pub struct AggregationEngine<E> {
    store: BoundedCorpusStore,
    normalizer: Normalizer,
    stopwords: StopwordFilter,
    enricher: E,
}

impl<E: Enricher> AggregationEngine<E> {
    #[must_use]
    pub fn new(
        store: BoundedCorpusStore,
        normalizer: Normalizer,
        stopwords: StopwordFilter,
        enricher: E,
    ) -> Self {
        Self {
            store,
            normalizer,
            stopwords,
            enricher,
        }
    }

    /// Count every token of every item's normalized raw text. Stopwords
    /// are counted too; they are filtered only when reporting.
    pub async fn compute_frequencies(&self) -> Result<FrequencyTable> {
        let items = self.store.find_all().await?;
        let total = items.len();
        let mut table = FrequencyTable::new();

        for (index, item) in items.iter().enumerate() {
            log_progress("frequency count", index + 1, total);
            for token in tokenize(&self.normalizer.normalize(&item.raw_text)) {
                table.merge_token(&token);
            }
        }

        log::info!("frequency count finished: {} distinct words", table.len());
        Ok(table)
    }

    /// Transform, score, and write back every item, summing probabilities
    /// into a [`SentimentDistribution`].
    ///
    /// Recoverable per-item failures are logged and skipped; the scorer's
    /// daily limit aborts the pass with a distinct error. Already-scored
    /// items keep their score and still contribute to the sums, so a
    /// re-run after an abort produces a complete distribution.
    pub async fn compute_sentiment(&self) -> Result<SentimentDistribution> {
        let items = self.store.find_all().await?;
        let total = items.len();
        let mut distribution = SentimentDistribution::new();

        for (index, mut item) in items.into_iter().enumerate() {
            log_progress("sentiment analysis", index + 1, total);

            let tokens = tokenize(&self.normalizer.normalize(&item.raw_text));
            item.transformed_text = Some(self.stopwords.remove_stopwords(tokens).join(" "));

            match self.enricher.enrich(&mut item).await {
                Ok(EnrichOutcome::Scored) => {
                    if let Some(sentiment) = &item.sentiment {
                        distribution.add(sentiment);
                    }
                    self.store.update_in_place(&item).await?;
                }
                Ok(EnrichOutcome::SkippedAlreadyScored) => {
                    if let Some(sentiment) = &item.sentiment {
                        distribution.add(sentiment);
                    }
                }
                Ok(EnrichOutcome::SkippedEmpty) => {
                    log::warn!(
                        "item {} has no text left after transformation, skipping",
                        item.id
                    );
                }
                Err(err) if err.is_fatal() => {
                    log::error!("daily scoring limit reached at item {}, aborting pass", item.id);
                    return Err(AnalysisError::DailyLimitReached(err));
                }
                Err(err) => {
                    log::error!("scoring item {} failed: {err}", item.id);
                }
            }
        }

        log::info!(
            "sentiment analysis finished: {:.3} total probability mass",
            distribution.total()
        );
        Ok(distribution)
    }

    /// Group items by user and average each probability over the user's
    /// scored items. Users with no scored items are excluded. Output is in
    /// first-seen user order.
    pub async fn compute_user_summary(&self) -> Result<Vec<UserSummary>> {
        let items = self.store.find_all().await?;

        let mut order: Vec<i64> = Vec::new();
        let mut groups: HashMap<i64, (f64, f64, f64, u32)> = HashMap::new();
        for item in &items {
            let Some(sentiment) = &item.sentiment else {
                continue;
            };
            let entry = groups.entry(item.user_id).or_insert_with(|| {
                order.push(item.user_id);
                (0.0, 0.0, 0.0, 0)
            });
            entry.0 += sentiment.positive;
            entry.1 += sentiment.negative;
            entry.2 += sentiment.neutral;
            entry.3 += 1;
        }

        let summaries = order
            .into_iter()
            .map(|user_id| {
                let (pos, neg, neutral, n) = groups[&user_id];
                let n = f64::from(n);
                UserSummary {
                    user_id,
                    avg_positive: pos / n,
                    avg_negative: neg / n,
                    avg_neutral: neutral / n,
                }
            })
            .collect();
        Ok(summaries)
    }

    /// Visit each distinct user once, in store enumeration order, and
    /// accumulate `ratio_fn` over their first stored item. Users whose
    /// ratio is undefined (`None`) are skipped entirely.
    pub async fn compute_cumulative_series<F>(&self, ratio_fn: F) -> Result<CumulativeSeries>
    where
        F: Fn(&Item) -> Option<f64>,
    {
        let user_ids = self.store.distinct_user_ids().await?;
        let items = self.store.find_all().await?;

        let mut first_by_user: HashMap<i64, &Item> = HashMap::new();
        for item in &items {
            first_by_user.entry(item.user_id).or_insert(item);
        }

        let mut series = CumulativeSeries::new();
        for user_id in user_ids {
            let Some(item) = first_by_user.get(&user_id).copied() else {
                continue;
            };
            match ratio_fn(item) {
                Some(ratio) => series.push_ratio(ratio),
                None => log::debug!("user {user_id} has no defined ratio, skipping"),
            }
        }
        Ok(series)
    }
}

fn log_progress(pass: &str, done: usize, total: usize) {
    if total > 0 && done % PROGRESS_EVERY == 0 {
        log::info!("{pass}: processed {done} of {total}");
    }
}
