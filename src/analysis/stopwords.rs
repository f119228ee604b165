//! Stopword filtering.
//!
//! The English set is built once per process and shared by reference; custom
//! sets can be constructed for tests or other corpora.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens shorter than this many characters are always dropped
pub const MIN_TOKEN_CHARS: usize = 3;

/// Common English function words excluded from keyword and similarity work
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "might", "more", "most", "must", "my", "myself", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

static ENGLISH_SET: LazyLock<StopwordSet> =
    LazyLock::new(|| StopwordSet::new(ENGLISH.iter().copied(), MIN_TOKEN_CHARS));

/// Immutable stopword set plus the minimum token length rule
#[derive(Debug, Clone)]
pub struct StopwordSet
{
    words: HashSet<String>,
    min_chars: usize,
}

impl StopwordSet
{
    /// Process-wide English set
    pub fn english() -> &'static StopwordSet
    {
        &ENGLISH_SET
    }

    /// Build a set from arbitrary words; entries are lowercased
    pub fn new<I, S>(
        words: I,
        min_chars: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| {
                w.as_ref()
                    .to_lowercase()
            })
            .collect();

        Self { words, min_chars }
    }

    /// True when `token` is listed in the set
    pub fn contains(
        &self,
        token: &str,
    ) -> bool
    {
        self.words
            .contains(token)
    }

    /// True when `token` survives filtering
    pub fn keeps(
        &self,
        token: &str,
    ) -> bool
    {
        token
            .chars()
            .count()
            >= self.min_chars
            && !self.contains(token)
    }

    /// Drop stopwords and short tokens, preserving order
    pub fn filter(
        &self,
        mut tokens: Vec<String>,
    ) -> Vec<String>
    {
        tokens.retain(|t| self.keeps(t));
        tokens
    }

    pub fn len(&self) -> usize
    {
        self.words
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.words
            .is_empty()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn owned(words: &[&str]) -> Vec<String>
    {
        words
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn removes_stopwords_and_short_tokens_in_order()
    {
        let set = StopwordSet::english();
        let kept = set.filter(owned(&["what", "is", "a", "binary", "go", "search", "the", "tree"]));
        assert_eq!(kept, owned(&["binary", "search", "tree"]));
    }

    #[test]
    fn all_stopwords_filter_to_empty()
    {
        let set = StopwordSet::english();
        assert!(
            set.filter(owned(&["why", "would", "you", "do", "that"]))
                .is_empty()
        );
    }

    #[test]
    fn three_character_tokens_survive()
    {
        let set = StopwordSet::english();
        assert!(set.keeps("sql"));
        assert!(!set.keeps("os"));
    }

    #[test]
    fn custom_sets_are_injectable()
    {
        let set = StopwordSet::new(["Tree"], 1);
        assert!(set.contains("tree"));
        assert!(set.keeps("a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn english_set_is_shared()
    {
        assert!(std::ptr::eq(StopwordSet::english(), StopwordSet::english()));
        assert!(StopwordSet::english().len() > 100);
    }
}
