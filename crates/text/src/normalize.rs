use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one `scheme://`-prefixed token up to the next whitespace
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.-]*://\S*").expect("link pattern is valid"));

/// Deterministic normalization pipeline for raw stream text.
///
/// Steps run in fixed order: strip links, remove the collection keyword,
/// collapse runs of non-alphabetic characters to a single space, lowercase.
/// The output may be empty or whitespace-only; callers decide what that
/// means. Normalization is idempotent: applying it twice yields the same
/// string as applying it once.
#[derive(Debug, Clone)]
pub struct Normalizer {
    keyword: String,
}

impl Normalizer {
    /// `keyword` is the search term the collection was built from; its
    /// occurrences are removed so it does not dominate every table.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }

    /// The collection keyword this normalizer removes
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Run the full pipeline over `raw`.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let text = LINK_RE.replace_all(raw, "");
        let text = remove_keyword(&text, &self.keyword);
        let text = only_alphabetic(&text);
        text.to_lowercase()
    }
}

/// Remove case-sensitive occurrences of `keyword` that stand on a word
/// boundary. An occurrence flanked by an alphabetic character on either
/// side is part of a larger word and is kept ("cat" never bites into
/// "category"). Empty keywords are a no-op.
fn remove_keyword(text: &str, keyword: &str) -> String {
    if keyword.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(keyword) {
        let start = cursor + found;
        let end = start + keyword.len();
        // Flanks are judged against the original text, so back-to-back
        // occurrences inside one word ("abab" for keyword "ab") all see
        // their real neighbors.
        let flanked_left = text[..start].chars().next_back().is_some_and(char::is_alphabetic);
        let flanked_right = text[end..].chars().next().is_some_and(char::is_alphabetic);

        out.push_str(&text[cursor..start]);
        if flanked_left || flanked_right {
            out.push_str(keyword);
        }
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Replace every maximal run of non-ASCII-alphabetic characters with a
/// single space.
fn only_alphabetic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }
    out
}

/// Split on runs of whitespace. Empty tokens are never produced, so
/// tokenizing an empty or whitespace-only string yields an empty list.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_links_before_anything_else() {
        let n = Normalizer::new("");
        assert_eq!(n.normalize("check http://x.co now"), "check now");
        assert_eq!(n.normalize("https://a.b/c?d=e only"), " only");
    }

    #[test]
    fn removes_keyword_on_word_boundaries_only() {
        let n = Normalizer::new("cat");
        assert_eq!(n.normalize("cat category cat"), " category ");
        assert_eq!(n.normalize("the cat sat"), "the sat");
    }

    #[test]
    fn repeated_keyword_inside_one_word_is_kept_whole() {
        let n = Normalizer::new("ab");
        assert_eq!(n.normalize("abab"), "abab");
        assert_eq!(n.normalize("ab abab ab"), " abab ");
    }

    #[test]
    fn keyword_removal_is_case_sensitive() {
        let n = Normalizer::new("Rust");
        assert_eq!(n.normalize("Rust rust Rust"), " rust ");
    }

    #[test]
    fn collapses_non_alphabetic_runs_and_lowercases() {
        let n = Normalizer::new("");
        assert_eq!(n.normalize("It was AWESOME!!!111 so-so"), "it was awesome so so");
    }

    #[test]
    fn empty_input_stays_empty() {
        let n = Normalizer::new("kw");
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "check http://x.co now",
            "Mixed CASE and 123 numbers!",
            "#hashtag @mention ftp://files.example.org/x",
            "abab ab abba",
            "",
            "   spaced   out   ",
        ];
        for keyword in ["", "cat", "hashtag", "ab"] {
            let n = Normalizer::new(keyword);
            for raw in samples {
                let once = n.normalize(raw);
                assert_eq!(n.normalize(&once), once, "keyword={keyword:?} raw={raw:?}");
            }
        }
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("a  b\tc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn tokenize_never_yields_empty_tokens() {
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize("   "), Vec::<String>::new());
    }
}
