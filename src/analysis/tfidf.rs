//! TF-IDF term weighting against a reference corpus.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::keywords::{significant_tokens, term_frequencies};
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tokenizer::tokenize;

/// A term and its weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTerm
{
    pub term: String,
    pub weight: f64,
}

/// Weight the significant terms of `text` by TF-IDF.
///
/// Term frequency is the share of filtered tokens. With no corpus the terms come
/// back in first-seen order weighted by tf alone. Otherwise
/// `idf = ln((N + 1) / (df + 1))`, where `df` counts corpus documents whose
/// unfiltered tokens contain the term, and terms are sorted by descending
/// weight with ties in first-seen order. A term present in every document gets
/// weight zero.
pub fn rank_terms_by_tfidf<S>(
    text: &str,
    corpus: &[S],
    stopwords: &StopwordSet,
) -> Vec<WeightedTerm>
where
    S: AsRef<str> + Sync,
{
    let filtered = significant_tokens(text, stopwords);
    let total = filtered.len();
    if total == 0
    {
        return Vec::new();
    }

    let tf = term_frequencies(filtered);
    let mut weighted: Vec<WeightedTerm> = tf
        .into_iter()
        .map(|(term, n)| WeightedTerm { term, weight: n as f64 / total as f64 })
        .collect();

    if corpus.is_empty()
    {
        return weighted;
    }

    let doc_sets: Vec<HashSet<String>> = corpus
        .par_iter()
        .map(|doc| {
            tokenize(doc.as_ref())
                .into_iter()
                .collect()
        })
        .collect();

    let doc_count = (corpus.len() + 1) as f64;
    for wt in &mut weighted
    {
        let df = doc_sets
            .iter()
            .filter(|set| set.contains(&wt.term))
            .count()
            + 1;
        wt.weight *= (doc_count / df as f64).ln();
    }

    weighted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    weighted
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn terms(ws: &[WeightedTerm]) -> Vec<&str>
    {
        ws.iter()
            .map(|w| {
                w.term
                    .as_str()
            })
            .collect()
    }

    #[test]
    fn without_corpus_returns_tf_in_first_seen_order()
    {
        let empty: [&str; 0] = [];
        let got = rank_terms_by_tfidf("mutex deadlock mutex", &empty, StopwordSet::english());
        assert_eq!(terms(&got), vec!["mutex", "deadlock"]);
        assert!((got[0].weight - 2.0 / 3.0).abs() < 1e-12);
        assert!((got[1].weight - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rare_terms_outrank_common_ones()
    {
        let corpus = ["thread basics", "thread pools", "thread safety"];
        let got = rank_terms_by_tfidf("thread deadlock", &corpus, StopwordSet::english());

        // thread: df = 3 + 1 = 4 = N + 1, so idf = 0
        assert_eq!(terms(&got), vec!["deadlock", "thread"]);
        assert_eq!(got[1].weight, 0.0);
        assert!((got[0].weight - 0.5 * 2f64.ln() * 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_has_no_terms()
    {
        assert!(rank_terms_by_tfidf("the of and", &["x"], StopwordSet::english()).is_empty());
    }
}
