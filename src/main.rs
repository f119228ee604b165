use anyhow::Result;
use clap::Parser;
use doubtsift::cli::{AppContext, Cli, Commands};
use doubtsift::infra::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    logging::init(&ctx);

    match cli.command {
        Commands::Keywords(args) => doubtsift::core::keywords_run(args, &ctx),
        Commands::Similarity(args) => doubtsift::core::similarity_run(args, &ctx),
        Commands::Tags(args) => doubtsift::core::tags_run(args, &ctx),
        Commands::Catalog(args) => doubtsift::core::catalog_run(args, &ctx),
        Commands::Tfidf(args) => doubtsift::core::tfidf_run(args, &ctx),
        Commands::Submit(args) => doubtsift::core::submit::run(args, &ctx),
        Commands::Similar(args) => doubtsift::core::similar_run(args, &ctx),
        Commands::Stats(args) => doubtsift::core::stats_run(args, &ctx),
        Commands::Init(args) => doubtsift::infra::config::init(args, &ctx),
        Commands::Completions(args) => doubtsift::completion::run(args, &ctx),
    }
}
