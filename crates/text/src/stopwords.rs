use std::collections::HashSet;

/// English stopwords, taken from the NLTK corpus
const NLTK_ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now",
];

/// Membership test against an injected word list.
///
/// The list is configuration, not a language-level constant: swap it for a
/// localized set without touching the pipeline.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl StopwordFilter {
    /// Build a filter from any collection of words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The English list the original analysis shipped with.
    #[must_use]
    pub fn nltk_english() -> Self {
        Self::new(NLTK_ENGLISH.iter().copied())
    }

    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop stopwords, preserving the order of the remaining tokens.
    #[must_use]
    pub fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .collect()
    }

    /// Number of words in the injected list
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
