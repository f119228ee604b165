use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::store::DEFAULT_STATS_LIMIT;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "dsift")]
#[command(
    about = "Keyword extraction, tag prediction and duplicate detection for Q&A doubts"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging (overridden by DOUBTSIFT_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the most frequent significant words from text
    Keywords(KeywordsArgs),

    /// Cosine similarity between two texts
    Similarity(SimilarityArgs),

    /// Predict category tags for a title and description
    Tags(TagsArgs),

    /// Show the active tag catalog
    Catalog(CatalogArgs),

    /// Rank terms of a text by TF-IDF against stored doubts
    Tfidf(TfidfArgs),

    /// Analyze and store a new doubt
    Submit(SubmitArgs),

    /// Show the duplicate candidates recorded for a stored doubt
    Similar(SimilarArgs),

    /// Tag usage across stored doubts
    Stats(StatsArgs),

    /// Initialize a doubtsift.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct KeywordsArgs {
    /// Text to analyze (`-` reads stdin, `@file` reads a file)
    pub text: String,

    /// Maximum keywords to return (defaults to the configured cap)
    #[arg(short = 'n', long)]
    pub max: Option<usize>,

    /// Also print tokens and filtered tokens
    #[arg(long)]
    pub profile: bool,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SimilarityArgs {
    /// First text (`-` reads stdin, `@file` reads a file)
    pub a: String,

    /// Second text (`@file` reads a file)
    pub b: String,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct TagsArgs {
    /// Question title
    #[arg(long)]
    pub title: String,

    /// Question description (`-` reads stdin, `@file` reads a file)
    #[arg(long)]
    pub description: String,

    /// Maximum tags to return (defaults to the configured cap)
    #[arg(short = 'n', long)]
    pub max: Option<usize>,

    /// Show every positive category score
    #[arg(long)]
    pub scores: bool,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Load this TOML catalog instead of the configured one
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct TfidfArgs {
    /// Text to analyze (`-` reads stdin, `@file` reads a file)
    pub text: String,

    /// Store to use as the document corpus
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Maximum terms to print
    #[arg(short = 'n', long, default_value = "10")]
    pub max: usize,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Question title
    #[arg(long)]
    pub title: String,

    /// Question description (`-` reads stdin, `@file` reads a file)
    #[arg(long)]
    pub description: String,

    /// User tag; repeat for several
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Store file (defaults to the configured store)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct SimilarArgs {
    /// Id of a stored doubt
    pub id: String,

    /// Store file (defaults to the configured store)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Store file (defaults to the configured store)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Number of tags to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_STATS_LIMIT)]
    pub limit: usize,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
