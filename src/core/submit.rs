//! Submission workflow: validate a new doubt, then compute its keywords,
//! automatic tags and duplicate candidates.
//!
//! The three analyses are independent and run concurrently; the candidate scan
//! only reads the corpus it is handed.

use anyhow::Result;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::analysis::engine::ContentAnalyzer;
use crate::analysis::error::AnalysisError;
use crate::analysis::ranker::{Candidate, CorpusSimilaritySource};
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tags::{TAG_MAX_CHARS, TAG_MIN_CHARS, validate_tag};
use crate::cli::{AppContext, SubmitArgs};
use crate::core::store::DoubtStore;
use crate::infra::config;
use crate::infra::io::read_text_arg;
use crate::infra::utils::{ListFmt, Paint, ScoreFmt};

/// Length bounds on submission fields, in characters after trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionLimits
{
    pub title_min: usize,
    pub title_max: usize,
    pub description_min: usize,
    pub description_max: usize,
    pub tag_min: usize,
    pub tag_max: usize,
}

impl Default for SubmissionLimits
{
    fn default() -> Self
    {
        Self {
            title_min: 5,
            title_max: 200,
            description_min: 10,
            description_max: 2000,
            tag_min: TAG_MIN_CHARS,
            tag_max: TAG_MAX_CHARS,
        }
    }
}

/// A doubt as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission
{
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Submission
{
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self
    {
        Self { title: title.into(), description: description.into(), tags: Vec::new() }
    }

    pub fn with_tags<I, S>(
        mut self,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .collect();
        self
    }

    /// Trim fields, normalize tags and enforce `limits`
    pub fn validate(
        &self,
        limits: &SubmissionLimits,
    ) -> Result<ValidSubmission, AnalysisError>
    {
        let title = self
            .title
            .trim();
        let description = self
            .description
            .trim();

        check_len("title", title, limits.title_min, limits.title_max)?;
        check_len("description", description, limits.description_min, limits.description_max)?;

        let mut tags: IndexSet<String> = IndexSet::new();
        for (i, raw) in self
            .tags
            .iter()
            .enumerate()
        {
            tags.insert(validate_tag(&format!("tags[{i}]"), raw, limits.tag_min, limits.tag_max)?);
        }

        Ok(ValidSubmission {
            title: title.to_string(),
            description: description.to_string(),
            user_tags: tags
                .into_iter()
                .collect(),
        })
    }
}

fn check_len(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), AnalysisError>
{
    let n = value
        .chars()
        .count();
    if n < min || n > max
    {
        return Err(AnalysisError::invalid(
            field,
            format!("length {n} outside {min}..={max} characters"),
        ));
    }
    Ok(())
}

/// A submission whose fields passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidSubmission
{
    pub title: String,
    pub description: String,
    pub user_tags: Vec<String>,
}

impl ValidSubmission
{
    /// Combined text used for keywords and similarity
    pub fn text(&self) -> String
    {
        format!("{} {}", self.title, self.description)
    }
}

/// Everything the engine attaches to a new item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnalysis
{
    pub keywords: Vec<String>,
    pub auto_tags: Vec<String>,
    /// User tags first, then automatic tags, without duplicates
    pub tags: Vec<String>,
    pub similar: Vec<Candidate>,
}

/// Analyze `submission` against `source`, which must not contain the submission itself
#[instrument(skip_all, fields(title = %submission.title))]
pub fn analyze_submission(
    analyzer: &ContentAnalyzer<'_>,
    submission: &ValidSubmission,
    source: &(dyn CorpusSimilaritySource + Sync),
) -> SubmissionAnalysis
{
    let text = submission.text();

    let ((keywords, auto_tags), similar) = rayon::join(
        || {
            rayon::join(
                || analyzer.keywords(&text),
                || analyzer.predict_tags(&submission.title, &submission.description),
            )
        },
        || analyzer.rank_candidates(&text, source),
    );

    let tags = merge_tags(&submission.user_tags, &auto_tags);
    debug!(
        keywords = keywords.len(),
        auto_tags = auto_tags.len(),
        similar = similar.len(),
        "analyzed submission"
    );

    SubmissionAnalysis { keywords, auto_tags, tags, similar }
}

/// Union of user and automatic tags, first occurrence wins
pub fn merge_tags(
    user: &[String],
    auto: &[String],
) -> Vec<String>
{
    user.iter()
        .chain(auto.iter())
        .cloned()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Run the `submit` command
pub fn run(
    args: SubmitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let catalog = cfg.catalog()?;
    let analyzer = ContentAnalyzer::new(StopwordSet::english(), &catalog, cfg.analysis);
    let store = DoubtStore::open(cfg.resolve_store(args.store.as_deref())?);

    let description = read_text_arg(&args.description)?;
    let submission = Submission::new(args.title, description)
        .with_tags(args.tags)
        .validate(&cfg.limits)?;

    if ctx.dry_run
    {
        let analysis = store.preview(&analyzer, &submission)?;
        if args.json
        {
            println!("{}", serde_json::to_string(&json!({ "dry_run": true, "analysis": analysis }))?);
        }
        else
        {
            if !ctx.quiet
            {
                println!("{}", Paint::warn("Dry run: nothing stored", ctx.no_color));
            }
            print_analysis(&analysis, ctx);
        }
        return Ok(());
    }

    let record = store.submit(&analyzer, &submission)?;
    if args.json
    {
        println!("{}", serde_json::to_string(&record)?);
        return Ok(());
    }

    if !ctx.quiet
    {
        println!("{} {}", Paint::ok("Stored", ctx.no_color), Paint::accent(&record.id, ctx.no_color));
    }
    print_analysis(
        &SubmissionAnalysis {
            keywords: record.keywords,
            auto_tags: record.auto_tags,
            tags: record.tags,
            similar: record.similar,
        },
        ctx,
    );
    Ok(())
}

fn print_analysis(
    analysis: &SubmissionAnalysis,
    ctx: &AppContext,
)
{
    println!("  keywords: {}", ListFmt::join_or_dash(&analysis.keywords));
    println!("  tags:     {}", ListFmt::join_or_dash(&analysis.tags));
    if analysis
        .similar
        .is_empty()
    {
        println!("  similar:  -");
        return;
    }
    println!("  similar:");
    for c in &analysis.similar
    {
        println!("    {}  {}", ScoreFmt::percent(c.score), Paint::accent(&c.item_id, ctx.no_color));
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::analysis::ranker::{Corpus, CorpusEntry};

    fn valid(
        title: &str,
        description: &str,
    ) -> ValidSubmission
    {
        Submission::new(title, description)
            .validate(&SubmissionLimits::default())
            .unwrap()
    }

    #[test]
    fn rejects_short_title_and_long_description()
    {
        let limits = SubmissionLimits::default();

        let err = Submission::new("  hi  ", "a long enough description")
            .validate(&limits)
            .unwrap_err();
        assert_eq!(err.field(), "title");

        let err = Submission::new("Valid title", "d".repeat(2001))
            .validate(&limits)
            .unwrap_err();
        assert_eq!(err.field(), "description");
    }

    #[test]
    fn normalizes_and_dedupes_user_tags()
    {
        let v = Submission::new("Heap question", "How do heaps work?")
            .with_tags(["  DSA ", "dsa", "Heaps"])
            .validate(&SubmissionLimits::default())
            .unwrap();
        assert_eq!(v.user_tags, vec!["dsa", "heaps"]);
    }

    #[test]
    fn rejects_invalid_user_tag()
    {
        let err = Submission::new("Heap question", "How do heaps work?")
            .with_tags(["ok", "x"])
            .validate(&SubmissionLimits::default())
            .unwrap_err();
        assert_eq!(err.field(), "tags[1]");
    }

    #[test]
    fn merge_keeps_user_tags_first()
    {
        let user = vec!["heaps".to_string(), "dsa".to_string()];
        let auto = vec!["dsa".to_string(), "os".to_string()];
        assert_eq!(merge_tags(&user, &auto), vec!["heaps", "dsa", "os"]);
    }

    #[test]
    fn analysis_fills_every_field()
    {
        let analyzer = ContentAnalyzer::builtin();
        let corpus = Corpus::new(vec![
            CorpusEntry::new("bst", "What is a binary search tree", "Explain the idea"),
            CorpusEntry::new("tcp", "TCP handshake", "Why three packets"),
        ])
        .unwrap();
        let scan = analyzer.full_scan(&corpus);

        let sub = valid("Binary search trees", "Explain binary search trees and their traversal");
        let out = analyze_submission(&analyzer, &sub, &scan);

        assert_eq!(out.keywords[..3], ["binary", "search", "trees"]);
        assert_eq!(out.auto_tags[0], "dsa");
        assert_eq!(out.tags, out.auto_tags);
        assert_eq!(out.similar.len(), 1);
        assert_eq!(out.similar[0].item_id, "bst");
    }

    #[test]
    fn empty_corpus_gives_no_candidates()
    {
        let analyzer = ContentAnalyzer::builtin();
        let corpus = Corpus::default();
        let scan = analyzer.full_scan(&corpus);
        let out = analyze_submission(&analyzer, &valid("Any title", "Any description here"), &scan);
        assert!(out.similar.is_empty());
    }
}
