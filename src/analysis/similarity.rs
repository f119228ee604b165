//! Bag-of-words cosine similarity.
//!
//! Vectors are sparse: a term missing from a text's map has count zero over the
//! union vocabulary, so the dot product only needs the shared terms.

use std::collections::HashMap;

use crate::analysis::keywords::significant_tokens;
use crate::analysis::stopwords::StopwordSet;

/// Term-frequency vector of one filtered text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector
{
    counts: HashMap<String, u64>,
    norm_sq: u64,
}

impl TermVector
{
    /// Build from already-filtered tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for t in tokens
        {
            *counts
                .entry(t.into())
                .or_insert(0) += 1;
        }

        let norm_sq = counts
            .values()
            .map(|c| c * c)
            .sum();

        Self { counts, norm_sq }
    }

    /// Tokenize, filter and count `text`
    pub fn from_text(
        text: &str,
        stopwords: &StopwordSet,
    ) -> Self
    {
        Self::from_tokens(significant_tokens(text, stopwords))
    }

    pub fn is_empty(&self) -> bool
    {
        self.counts
            .is_empty()
    }

    /// Occurrences of `term`
    pub fn count(
        &self,
        term: &str,
    ) -> u64
    {
        self.counts
            .get(term)
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn vocabulary_len(&self) -> usize
    {
        self.counts
            .len()
    }

    /// Integer dot product; iterates the smaller map
    pub fn dot(
        &self,
        other: &TermVector,
    ) -> u64
    {
        let (small, large) = if self.counts.len() <= other.counts.len()
        {
            (self, other)
        }
        else
        {
            (other, self)
        };

        small
            .counts
            .iter()
            .map(|(term, c)| c * large.count(term))
            .sum()
    }

    /// Cosine similarity in `[0, 1]`; zero when either vector is empty.
    ///
    /// Dot product and squared norms are exact integers, and the denominator is
    /// `sqrt(|a|² · |b|²)`, so the result is symmetric bit-for-bit and a vector
    /// compared with itself scores exactly 1.0.
    pub fn cosine(
        &self,
        other: &TermVector,
    ) -> f64
    {
        if self.norm_sq == 0 || other.norm_sq == 0
        {
            return 0.0;
        }

        let denom = ((self.norm_sq as f64) * (other.norm_sq as f64)).sqrt();
        if denom == 0.0
        {
            return 0.0;
        }

        (self.dot(other) as f64 / denom).clamp(0.0, 1.0)
    }
}

/// Cosine similarity of two raw texts after tokenizing and stopword filtering
pub fn similarity(
    a: &str,
    b: &str,
    stopwords: &StopwordSet,
) -> f64
{
    TermVector::from_text(a, stopwords).cosine(&TermVector::from_text(b, stopwords))
}
