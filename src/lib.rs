//! **doubtsift** - Content analysis for Q&A "doubt" forums
//!
//! Tokenizes and filters free text, extracts frequency-ranked keywords, scores
//! term-frequency cosine similarity, predicts category tags from a catalog and
//! ranks stored doubts as duplicate candidates for a new one.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Text analysis engine - pure functions over shared read-only tables
pub mod analysis {
    /// Field-level validation errors
    pub mod error;
    pub use error::AnalysisError;

    /// Lowercasing word-character tokenizer
    pub mod tokenizer;
    pub use tokenizer::tokenize;

    /// English stopword list and short-token rule
    pub mod stopwords;
    pub use stopwords::StopwordSet;

    /// Frequency-ranked keyword extraction
    pub mod keywords;
    pub use keywords::{TextProfile, extract_keywords, preprocess};

    /// Term-frequency cosine similarity
    pub mod similarity;
    pub use similarity::{TermVector, similarity};

    /// Catalog-driven tag prediction
    pub mod tags;
    pub use tags::{TagCatalog, TagCategory, TagPredictor, TagScore, TagWeights};

    /// Duplicate-candidate ranking over a corpus
    pub mod ranker;
    pub use ranker::{Candidate, Corpus, CorpusEntry, CorpusSimilaritySource, FullScan};

    /// TF-IDF term weighting
    pub mod tfidf;
    pub use tfidf::{WeightedTerm, rank_terms_by_tfidf};

    /// Engine facade binding stopwords, catalog and settings
    pub mod engine;
    pub use engine::{ContentAnalyzer, EngineSettings};
}

/// Core workflows - submission analysis, persistence and command handlers
pub mod core {
    /// Validation and concurrent analysis of new doubts
    pub mod submit;
    pub use submit::{Submission, SubmissionAnalysis, ValidSubmission, analyze_submission};

    /// Locked JSON-lines doubt store
    pub mod store;
    pub use store::{DoubtRecord, DoubtStore, TagCount, similar_run, stats_run};

    /// Read-only analysis commands
    pub mod inspect;
    pub use inspect::{catalog_run, keywords_run, similarity_run, tags_run, tfidf_run};
}

/// Infrastructure - Configuration, I/O, logging and utilities
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Memory-mapped file I/O for large stores (>1MB threshold)
    pub mod io;
    pub use io::{FileContent, read_file_smart, read_text_arg};

    /// tracing subscriber setup
    pub mod logging;

    /// Utility functions and helpers for common operations
    pub mod utils;
    // Keep utils private - not part of the public API
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use analysis::{AnalysisError, Candidate, ContentAnalyzer, TagCatalog};
pub use core::{DoubtRecord, DoubtStore, Submission};
