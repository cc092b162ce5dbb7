use chatter_domain::Sentiment;
use serde::Serialize;

/// Raw sums of sentiment probability mass across all scored items.
///
/// Sums, not averages, and not re-normalized into a distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl SentimentDistribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one item's probabilities into the sums.
    pub fn add(&mut self, sentiment: &Sentiment) {
        self.negative += sentiment.negative;
        self.neutral += sentiment.neutral;
        self.positive += sentiment.positive;
    }

    /// Total accumulated mass across all three labels
    #[must_use]
    pub fn total(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

/// Average sentiment probabilities for one user, computed over that user's
/// scored items only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub avg_positive: f64,
    pub avg_negative: f64,
    pub avg_neutral: f64,
}

/// Running totals of a per-user ratio, one entry per user visited.
///
/// Order-dependent by construction; the values are never sorted. There is
/// no leading zero sentinel: the first entry is the first defined ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CumulativeSeries {
    values: Vec<f64>,
}

impl CumulativeSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `previous running total + ratio`.
    pub fn push_ratio(&mut self, ratio: f64) {
        let previous = self.values.last().copied().unwrap_or(0.0);
        self.values.push(previous + ratio);
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sentiment(neg: f64, neutral: f64, pos: f64) -> Sentiment {
        Sentiment {
            label: "x".to_string(),
            negative: neg,
            neutral,
            positive: pos,
        }
    }

    #[test]
    fn distribution_sums_rather_than_averages() {
        let mut dist = SentimentDistribution::new();
        dist.add(&sentiment(0.5, 0.3, 0.2));
        dist.add(&sentiment(0.5, 0.3, 0.2));

        assert_eq!(dist.negative, 1.0);
        assert_eq!(dist.neutral, 0.6);
        assert!((dist.positive - 0.4).abs() < 1e-12);
        assert!((dist.total() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn series_accumulates_running_totals_in_push_order() {
        let mut series = CumulativeSeries::new();
        series.push_ratio(2.0);
        series.push_ratio(0.5);
        series.push_ratio(3.0);
        assert_eq!(series.values(), &[2.0, 2.5, 5.5]);
    }

    #[test]
    fn series_with_non_negative_ratios_is_non_decreasing() {
        let mut series = CumulativeSeries::new();
        for ratio in [0.0, 1.5, 0.0, 2.25] {
            series.push_ratio(ratio);
        }
        for window in series.values().windows(2) {
            assert!(window[1] >= window[0]);
        }
    }
}
