use chatter_text::StopwordFilter;
use serde::Serialize;
use std::collections::HashMap;

/// Word occurrence counts accumulated across processed items.
///
/// Accumulation counts every token, stopwords included; filtering happens
/// only when reporting. Reporting order is descending count with ties
/// broken by first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`.
    pub fn merge_token(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
                self.order.push(token.to_string());
            }
        }
    }

    /// Fold another table into this one. Counting is order-independent:
    /// merging tables built from disjoint batches equals the table built
    /// from their concatenation.
    pub fn merge(&mut self, other: &Self) {
        for word in &other.order {
            let added = other.counts.get(word).copied().unwrap_or(0);
            match self.counts.get_mut(word) {
                Some(count) => *count += added,
                None => {
                    self.counts.insert(word.clone(), added);
                    self.order.push(word.clone());
                }
            }
        }
    }

    /// Occurrences of `word` seen so far
    #[must_use]
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All entries, descending by count, ties in first-seen order.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .order
            .iter()
            .map(|word| (word.clone(), self.count(word)))
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// The `n` most frequent words; with a filter, stopwords are excluded
    /// at reporting time without touching the accumulated counts.
    #[must_use]
    pub fn top_n(&self, n: usize, exclude: Option<&StopwordFilter>) -> Vec<(String, u64)> {
        self.sorted_entries()
            .into_iter()
            .filter(|(word, _)| exclude.is_none_or(|filter| !filter.is_stopword(word)))
            .take(n)
            .collect()
    }
}
