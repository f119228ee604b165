//! Duplicate-candidate ranking over an existing corpus.
//!
//! Scoring is delegated to a [`CorpusSimilaritySource`]. The stock source is a
//! full parallel scan that recomputes cosine similarity against every entry;
//! an inverted index or approximate structure can replace it without touching
//! the threshold/sort/truncate contract implemented by [`rank_candidates`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analysis::error::AnalysisError;
use crate::analysis::similarity::TermVector;
use crate::analysis::stopwords::StopwordSet;

/// Scores must be strictly greater than this to become candidates
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Length cap of a candidate list
pub const DEFAULT_MAX_CANDIDATES: usize = 3;

/// A prior item flagged as similar, with its score in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate
{
    pub item_id: String,
    pub score: f64,
}

/// One existing item as supplied by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry
{
    pub id: String,
    pub title: String,
    pub description: String,
}

impl CorpusEntry
{
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self
    {
        Self { id: id.into(), title: title.into(), description: description.into() }
    }

    /// Title and description joined the way submissions are compared
    pub fn text(&self) -> String
    {
        format!("{} {}", self.title, self.description)
    }
}

/// Validated, ordered corpus; iteration order is the tie-break order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus
{
    entries: Vec<CorpusEntry>,
}

impl Corpus
{
    /// Reject entries without an id
    pub fn new(entries: Vec<CorpusEntry>) -> Result<Self, AnalysisError>
    {
        if let Some(i) = entries
            .iter()
            .position(|e| {
                e.id.trim()
                    .is_empty()
            })
        {
            return Err(AnalysisError::invalid(format!("corpus[{i}].id"), "must not be empty"));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CorpusEntry]
    {
        &self.entries
    }

    pub fn len(&self) -> usize
    {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries
            .is_empty()
    }
}

/// Produces similarity scores of a text against every corpus item.
///
/// Implementations must return scores in corpus iteration order so that ties
/// resolve the same way on every run.
pub trait CorpusSimilaritySource
{
    fn scores(
        &self,
        text: &str,
    ) -> Vec<Candidate>;
}

/// Exhaustive O(N) scan recomputing every pair
#[derive(Debug, Clone, Copy)]
pub struct FullScan<'a>
{
    corpus: &'a Corpus,
    stopwords: &'a StopwordSet,
}

impl<'a> FullScan<'a>
{
    pub fn new(
        corpus: &'a Corpus,
        stopwords: &'a StopwordSet,
    ) -> Self
    {
        Self { corpus, stopwords }
    }
}

impl CorpusSimilaritySource for FullScan<'_>
{
    #[instrument(level = "debug", skip_all, fields(corpus = self.corpus.len()))]
    fn scores(
        &self,
        text: &str,
    ) -> Vec<Candidate>
    {
        let query = TermVector::from_text(text, self.stopwords);
        if query.is_empty()
        {
            debug!("query has no significant tokens; every score is zero");
        }

        // Indexed parallel collect keeps corpus order
        self.corpus
            .entries()
            .par_iter()
            .map(|entry| Candidate {
                item_id: entry
                    .id
                    .clone(),
                score: query.cosine(&TermVector::from_text(&entry.text(), self.stopwords)),
            })
            .collect()
    }
}

/// Threshold and cap applied to raw scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankerSettings
{
    pub threshold: f64,
    pub max_candidates: usize,
}

impl Default for RankerSettings
{
    fn default() -> Self
    {
        Self { threshold: DEFAULT_SIMILARITY_THRESHOLD, max_candidates: DEFAULT_MAX_CANDIDATES }
    }
}

/// Keep scores above the threshold, best first, capped.
///
/// The sort is stable, so equal scores stay in corpus order. Below-threshold
/// entries are dropped, never stored with a low score.
pub fn rank_candidates(
    new_text: &str,
    source: &dyn CorpusSimilaritySource,
    settings: RankerSettings,
) -> Vec<Candidate>
{
    let mut kept: Vec<Candidate> = source
        .scores(new_text)
        .into_iter()
        .filter(|c| c.score > settings.threshold)
        .collect();

    kept.sort_by(|a, b| b.score.total_cmp(&a.score));
    kept.truncate(settings.max_candidates);

    debug!(kept = kept.len(), "ranked duplicate candidates");
    kept
}
