//! Bundles the engine components over shared read-only state.
//!
//! A [`ContentAnalyzer`] borrows a stopword set and a tag catalog (the
//! process-wide built-ins or injected fixtures) plus tunable settings, and
//! exposes the six operations with those bound.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{self, DEFAULT_MAX_KEYWORDS, TextProfile};
use crate::analysis::ranker::{
    Candidate, Corpus, CorpusSimilaritySource, DEFAULT_MAX_CANDIDATES,
    DEFAULT_SIMILARITY_THRESHOLD, FullScan, RankerSettings,
};
use crate::analysis::similarity;
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tags::{
    DEFAULT_KEYWORD_POOL, DEFAULT_MAX_TAGS, TagCatalog, TagPredictor, TagScore, TagWeights,
};
use crate::analysis::tfidf::{self, WeightedTerm};

/// Tunables of the engine; deserialized from the `[analysis]` config section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings
{
    /// Keyword list length cap
    pub max_keywords: usize,

    /// Predicted tag cap
    pub max_tags: usize,

    /// Extracted keywords consulted by the tag predictor
    pub tag_keyword_pool: usize,

    /// Candidates need a score strictly above this
    pub similarity_threshold: f64,

    /// Candidate list length cap
    pub max_candidates: usize,

    /// Tag scoring weights
    pub weights: TagWeights,
}

impl Default for EngineSettings
{
    fn default() -> Self
    {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_tags: DEFAULT_MAX_TAGS,
            tag_keyword_pool: DEFAULT_KEYWORD_POOL,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            weights: TagWeights::default(),
        }
    }
}

impl EngineSettings
{
    pub fn ranker(&self) -> RankerSettings
    {
        RankerSettings { threshold: self.similarity_threshold, max_candidates: self.max_candidates }
    }
}

/// Content analysis engine bound to its stopwords, catalog and settings
#[derive(Debug, Clone, Copy)]
pub struct ContentAnalyzer<'a>
{
    stopwords: &'a StopwordSet,
    catalog: &'a TagCatalog,
    settings: EngineSettings,
}

impl ContentAnalyzer<'static>
{
    /// English stopwords, built-in catalog, default settings
    pub fn builtin() -> Self
    {
        Self::new(StopwordSet::english(), TagCatalog::builtin(), EngineSettings::default())
    }
}

impl<'a> ContentAnalyzer<'a>
{
    pub fn new(
        stopwords: &'a StopwordSet,
        catalog: &'a TagCatalog,
        settings: EngineSettings,
    ) -> Self
    {
        Self { stopwords, catalog, settings }
    }

    pub fn with_settings(
        mut self,
        settings: EngineSettings,
    ) -> Self
    {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EngineSettings
    {
        &self.settings
    }

    /// Read-only access to the tag catalog
    pub fn catalog(&self) -> &'a TagCatalog
    {
        self.catalog
    }

    /// Keyword list capped at the configured maximum
    pub fn keywords(
        &self,
        text: &str,
    ) -> Vec<String>
    {
        keywords::extract_keywords(text, self.settings.max_keywords, self.stopwords)
    }

    /// Tokens, filtered tokens and keywords of `text`
    pub fn profile(
        &self,
        text: &str,
    ) -> TextProfile
    {
        keywords::preprocess(text, self.settings.max_keywords, self.stopwords)
    }

    pub fn similarity(
        &self,
        a: &str,
        b: &str,
    ) -> f64
    {
        similarity::similarity(a, b, self.stopwords)
    }

    fn predictor(&self) -> TagPredictor<'a>
    {
        TagPredictor::new(self.catalog, self.stopwords)
            .with_weights(self.settings.weights)
            .with_keyword_pool(self.settings.tag_keyword_pool)
    }

    /// Predicted tags capped at the configured maximum
    pub fn predict_tags(
        &self,
        title: &str,
        description: &str,
    ) -> Vec<String>
    {
        self.predictor()
            .predict(title, description, self.settings.max_tags)
    }

    /// Predicted tags with an explicit cap
    pub fn predict_tags_capped(
        &self,
        title: &str,
        description: &str,
        max_tags: usize,
    ) -> Vec<String>
    {
        self.predictor()
            .predict(title, description, max_tags)
    }

    /// All positive category scores, best first
    pub fn tag_scores(
        &self,
        title: &str,
        description: &str,
    ) -> Vec<TagScore>
    {
        self.predictor()
            .score(title, description)
    }

    /// Exhaustive scan source over `corpus`
    pub fn full_scan<'c>(
        &self,
        corpus: &'c Corpus,
    ) -> FullScan<'c>
    where
        'a: 'c,
    {
        FullScan::new(corpus, self.stopwords)
    }

    pub fn rank_candidates(
        &self,
        new_text: &str,
        source: &dyn CorpusSimilaritySource,
    ) -> Vec<Candidate>
    {
        crate::analysis::ranker::rank_candidates(new_text, source, self.settings.ranker())
    }

    pub fn tfidf<S>(
        &self,
        text: &str,
        corpus: &[S],
    ) -> Vec<WeightedTerm>
    where
        S: AsRef<str> + Sync,
    {
        tfidf::rank_terms_by_tfidf(text, corpus, self.stopwords)
    }
}
