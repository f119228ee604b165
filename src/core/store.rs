//! JSON-lines doubt store.
//!
//! Stands in for the persistence layer: one record per line, appended on
//! submit. A sidecar `<store>.lock` file carries an advisory lock. Submits hold
//! it exclusively across load → analyze → append, so a new doubt is never
//! compared with itself and concurrent submitters see each other in order.
//! Stored candidate lists are snapshots and are never recomputed.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fd_lock::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::{debug, info, instrument};

use crate::analysis::engine::ContentAnalyzer;
use crate::analysis::ranker::{Candidate, Corpus, CorpusEntry};
use crate::cli::{AppContext, SimilarArgs, StatsArgs};
use crate::core::submit::{SubmissionAnalysis, ValidSubmission, analyze_submission};
use crate::infra::config;
use crate::infra::io::read_file_smart;
use crate::infra::utils::{ListFmt, Paint, ScoreFmt};

/// Default number of rows returned by tag statistics
pub const DEFAULT_STATS_LIMIT: usize = 20;

/// A persisted doubt with its analysis snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubtRecord
{
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub auto_tags: Vec<String>,
    pub keywords: Vec<String>,
    pub similar: Vec<Candidate>,
    pub created_at: DateTime<Utc>,
}

impl DoubtRecord
{
    /// Build a record from a validated submission and its analysis
    pub fn new(
        submission: &ValidSubmission,
        analysis: SubmissionAnalysis,
        created_at: DateTime<Utc>,
    ) -> Self
    {
        Self {
            id: record_id(&submission.title, &submission.description, &created_at, 0),
            title: submission
                .title
                .clone(),
            description: submission
                .description
                .clone(),
            tags: analysis.tags,
            auto_tags: analysis.auto_tags,
            keywords: analysis.keywords,
            similar: analysis.similar,
            created_at,
        }
    }

    /// View as a corpus entry for similarity scans
    pub fn entry(&self) -> CorpusEntry
    {
        CorpusEntry::new(self.id.clone(), self.title.clone(), self.description.clone())
    }
}

/// 16 hex digits of xxh64 over content and creation time
fn record_id(
    title: &str,
    description: &str,
    created_at: &DateTime<Utc>,
    seed: u64,
) -> String
{
    let key = format!("{title}\n{description}\n{}", created_at.to_rfc3339());
    let h = xxhash_rust::xxh64::xxh64(key.as_bytes(), seed);
    format!("{h:016x}")
}

/// Usage count of one tag across the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct TagCount
{
    pub tag: String,
    pub count: usize,
}

/// Handle on a JSONL store file
#[derive(Debug, Clone)]
pub struct DoubtStore
{
    path: PathBuf,
}

impl DoubtStore
{
    pub fn open(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    fn lock_path(&self) -> PathBuf
    {
        let mut os = self
            .path
            .clone()
            .into_os_string();
        os.push(".lock");
        PathBuf::from(os)
    }

    /// Lock file for writers; creates the store directory and the lock
    fn writer_lock_file(&self) -> Result<File>
    {
        if let Some(parent) = self.path.parent()
        {
            if !parent
                .as_os_str()
                .is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory {}", parent.display())
                })?;
            }
        }

        let lock_path = self.lock_path();
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))
    }

    /// All records in file order; a missing file is an empty store
    pub fn load(&self) -> Result<Vec<DoubtRecord>>
    {
        if !self.path.exists()
        {
            return Ok(Vec::new());
        }

        let content = read_file_smart(&self.path)?;
        let text = content
            .as_str()
            .with_context(|| format!("Store {} is not UTF-8", self.path.display()))?;

        let mut records = Vec::new();
        for (i, line) in text
            .lines()
            .enumerate()
        {
            if line
                .trim()
                .is_empty()
            {
                continue;
            }
            let rec: DoubtRecord = serde_json::from_str(line).with_context(|| {
                format!("Failed to parse record on line {} of {}", i + 1, self.path.display())
            })?;
            records.push(rec);
        }

        debug!(records = records.len(), path = %self.path.display(), "loaded store");
        Ok(records)
    }

    /// [`load`](Self::load) under the shared lock, without creating any file.
    ///
    /// No store means nothing to read. A store without a lock file was never
    /// written by a locking submitter, so it is read as is.
    pub fn load_shared(&self) -> Result<Vec<DoubtRecord>>
    {
        if !self.path.exists()
        {
            return Ok(Vec::new());
        }

        let lock_path = self.lock_path();
        let file = match OpenOptions::new()
            .read(true)
            .open(&lock_path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound =>
            {
                debug!(path = %lock_path.display(), "no lock file; reading unlocked");
                return self.load();
            }
            Err(e) =>
            {
                return Err(e)
                    .with_context(|| format!("Failed to open lock file {}", lock_path.display()));
            }
        };

        let lock = RwLock::new(file);
        let _guard = lock
            .read()
            .context("Failed to acquire shared store lock")?;
        self.load()
    }

    /// Find one record by id
    pub fn get(
        &self,
        id: &str,
    ) -> Result<Option<DoubtRecord>>
    {
        Ok(self
            .load_shared()?
            .into_iter()
            .find(|r| r.id == id))
    }

    /// Analyze against the current store without touching the filesystem
    pub fn preview(
        &self,
        analyzer: &ContentAnalyzer<'_>,
        submission: &ValidSubmission,
    ) -> Result<SubmissionAnalysis>
    {
        let corpus = corpus_of(&self.load_shared()?)?;
        Ok(analyze_submission(analyzer, submission, &analyzer.full_scan(&corpus)))
    }

    /// Analyze and append a new doubt under the exclusive store lock
    #[instrument(skip_all, fields(store = %self.path.display()))]
    pub fn submit(
        &self,
        analyzer: &ContentAnalyzer<'_>,
        submission: &ValidSubmission,
    ) -> Result<DoubtRecord>
    {
        let mut lock = RwLock::new(self.writer_lock_file()?);
        let _guard = lock
            .write()
            .context("Failed to acquire exclusive store lock")?;

        let existing = self.load()?;
        let corpus = corpus_of(&existing)?;
        let analysis = analyze_submission(analyzer, submission, &analyzer.full_scan(&corpus));

        let now = Utc::now();
        let mut record = DoubtRecord::new(submission, analysis, now);

        // Re-seed on the off chance of an id collision
        let mut seed = 1;
        while existing
            .iter()
            .any(|r| r.id == record.id)
        {
            record.id = record_id(&record.title, &record.description, &now, seed);
            seed += 1;
        }

        self.append(&record)?;
        info!(id = %record.id, similar = record.similar.len(), "stored doubt");
        Ok(record)
    }

    fn append(
        &self,
        record: &DoubtRecord,
    ) -> Result<()>
    {
        let line = serde_json::to_string(record).context("Failed to serialize record")?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open store {}", self.path.display()))?;

        writeln!(f, "{line}").context("Failed to append record")?;
        f.sync_data()
            .context("Failed to sync store")?;
        Ok(())
    }

    /// Tag usage counts, most used first, ties by name
    pub fn tag_stats(
        &self,
        limit: usize,
    ) -> Result<Vec<TagCount>>
    {
        Ok(tag_counts(&self.load_shared()?, limit))
    }
}

/// Validated corpus view of stored records
pub fn corpus_of(records: &[DoubtRecord]) -> Result<Corpus>
{
    Ok(Corpus::new(
        records
            .iter()
            .map(DoubtRecord::entry)
            .collect(),
    )?)
}

/// Count tag occurrences over `records`
pub fn tag_counts(
    records: &[DoubtRecord],
    limit: usize,
) -> Vec<TagCount>
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in records
        .iter()
        .flat_map(|r| r.tags.iter())
    {
        *counts
            .entry(tag.as_str())
            .or_insert(0) += 1;
    }

    let mut out: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag: tag.to_string(), count })
        .collect();
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    out.truncate(limit);
    out
}

/// Run the `similar` command: show a stored doubt's candidates
pub fn similar_run(
    args: SimilarArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let store = DoubtStore::open(cfg.resolve_store(args.store.as_deref())?);

    let records = store.load_shared()?;
    let record = records
        .iter()
        .find(|r| r.id == args.id)
        .ok_or_else(|| anyhow::anyhow!("No doubt with id {} in {}", args.id, store.path().display()))?;

    let titles: HashMap<&str, &str> = records
        .iter()
        .map(|r| (r.id.as_str(), r.title.as_str()))
        .collect();

    if args.json
    {
        let similar: Vec<_> = record
            .similar
            .iter()
            .map(|c| {
                json!({
                    "item_id": c.item_id,
                    "score": c.score,
                    "title": titles.get(c.item_id.as_str()),
                })
            })
            .collect();
        let out = json!({ "id": record.id, "title": record.title, "similar": similar });
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    println!("{} {}", Paint::strong(&record.title, ctx.no_color), Paint::accent(&record.id, ctx.no_color));
    println!("  tags: {}", ListFmt::join_or_dash(&record.tags));
    if record
        .similar
        .is_empty()
    {
        if !ctx.quiet
        {
            println!("  no similar doubts were found when it was posted");
        }
        return Ok(());
    }

    for c in &record.similar
    {
        let title = titles
            .get(c.item_id.as_str())
            .copied()
            .unwrap_or("(deleted)");
        println!("  {}  {}  {}", ScoreFmt::score(c.score), Paint::accent(&c.item_id, ctx.no_color), title);
    }
    Ok(())
}

/// Run the `stats` command: tag usage across the store
pub fn stats_run(
    args: StatsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let store = DoubtStore::open(cfg.resolve_store(args.store.as_deref())?);
    let stats = store.tag_stats(args.limit)?;

    if args.json
    {
        println!("{}", serde_json::to_string(&json!({ "tag_stats": stats }))?);
        return Ok(());
    }

    if stats.is_empty()
    {
        if !ctx.quiet
        {
            println!("{}", Paint::warn("No tagged doubts yet", ctx.no_color));
        }
        return Ok(());
    }

    println!("{}", Table::new(stats));
    Ok(())
}
