//! Frequency-ranked keyword extraction.

use indexmap::IndexMap;
use serde::Serialize;

use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tokenizer::tokenize;

/// Default length cap for an item's keyword list
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Tokenize then stopword-filter `text`
pub fn significant_tokens(
    text: &str,
    stopwords: &StopwordSet,
) -> Vec<String>
{
    stopwords.filter(tokenize(text))
}

/// Count occurrences, keeping first-seen order of distinct tokens
pub fn term_frequencies<I, S>(tokens: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut freq: IndexMap<String, usize> = IndexMap::new();
    for t in tokens
    {
        *freq
            .entry(t.into())
            .or_insert(0) += 1;
    }
    freq
}

/// Top `max_keywords` tokens of `text` by descending frequency.
///
/// Ties keep the order in which tokens first appeared after filtering, so the
/// result is fully determined by the input. Empty and all-stopword texts give
/// an empty list.
pub fn extract_keywords(
    text: &str,
    max_keywords: usize,
    stopwords: &StopwordSet,
) -> Vec<String>
{
    rank_by_frequency(significant_tokens(text, stopwords), max_keywords)
}

/// Rank already-filtered tokens by frequency (stable on ties)
pub fn rank_by_frequency(
    filtered: Vec<String>,
    max_keywords: usize,
) -> Vec<String>
{
    let mut ranked: Vec<(String, usize)> = term_frequencies(filtered)
        .into_iter()
        .collect();

    // sort_by is stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(max_keywords);

    ranked
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Every intermediate representation of one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextProfile
{
    pub original: String,
    pub tokens: Vec<String>,
    pub filtered: Vec<String>,
    pub keywords: Vec<String>,
}

/// Run the tokenizer, stopword filter and keyword extractor over `text` at once
pub fn preprocess(
    text: &str,
    max_keywords: usize,
    stopwords: &StopwordSet,
) -> TextProfile
{
    let tokens = tokenize(text);
    let filtered = stopwords.filter(tokens.clone());
    let keywords = rank_by_frequency(filtered.clone(), max_keywords);

    TextProfile { original: text.to_string(), tokens, filtered, keywords }
}
