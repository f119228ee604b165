//! Read-only analysis commands: keywords, similarity, tags, catalog, tfidf.

use anyhow::Result;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::analysis::engine::{ContentAnalyzer, EngineSettings};
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tags::TagCatalog;
use crate::cli::{AppContext, CatalogArgs, KeywordsArgs, SimilarityArgs, TagsArgs, TfidfArgs};
use crate::core::store::DoubtStore;
use crate::infra::config;
use crate::infra::io::read_text_arg;
use crate::infra::utils::{ListFmt, Paint, ScoreFmt};

pub fn keywords_run(
    args: KeywordsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let text = read_text_arg(&args.text)?;
    let max = args
        .max
        .unwrap_or(cfg.analysis.max_keywords);

    let analyzer = ContentAnalyzer::builtin()
        .with_settings(EngineSettings { max_keywords: max, ..cfg.analysis });
    let profile = analyzer.profile(&text);

    if args.json
    {
        let out = if args.profile
        {
            serde_json::to_value(&profile)?
        }
        else
        {
            json!({ "keywords": profile.keywords })
        };
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    if args.profile
    {
        println!("{} {}", Paint::strong("tokens:", ctx.no_color), ListFmt::join_or_dash(&profile.tokens));
        println!("{} {}", Paint::strong("filtered:", ctx.no_color), ListFmt::join_or_dash(&profile.filtered));
        println!("{} {}", Paint::strong("keywords:", ctx.no_color), ListFmt::join_or_dash(&profile.keywords));
        return Ok(());
    }

    for kw in &profile.keywords
    {
        println!("{kw}");
    }
    Ok(())
}

pub fn similarity_run(
    args: SimilarityArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let a = read_text_arg(&args.a)?;
    let b = read_text_arg(&args.b)?;
    let score = ContentAnalyzer::builtin()
        .with_settings(cfg.analysis)
        .similarity(&a, &b);

    if args.json
    {
        println!("{}", serde_json::to_string(&json!({ "score": score }))?);
        return Ok(());
    }

    // Highlight scores that would make a duplicate candidate
    let rendered = ScoreFmt::score(score);
    if score > cfg.analysis.similarity_threshold
    {
        println!("{}", Paint::warn(&rendered, ctx.no_color));
    }
    else
    {
        println!("{rendered}");
    }
    Ok(())
}

pub fn tags_run(
    args: TagsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let catalog = cfg.catalog()?;
    let analyzer = ContentAnalyzer::new(StopwordSet::english(), &catalog, cfg.analysis);

    let title = args.title;
    let description = read_text_arg(&args.description)?;
    let max = args
        .max
        .unwrap_or(cfg.analysis.max_tags);

    if args.scores
    {
        let scores = analyzer.tag_scores(&title, &description);

        if args.json
        {
            println!("{}", serde_json::to_string(&json!({ "scores": scores }))?);
            return Ok(());
        }

        if scores.is_empty()
        {
            if !ctx.quiet
            {
                println!("{}", Paint::warn("No category matched", ctx.no_color));
            }
            return Ok(());
        }

        #[derive(Tabled)]
        struct ScoreRow
        {
            rank: usize,
            tag: String,
            score: String,
        }

        let rows: Vec<ScoreRow> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| ScoreRow { rank: i + 1, tag: s.tag.clone(), score: format!("{:.1}", s.score) })
            .collect();
        println!("{}", Table::new(rows));
        return Ok(());
    }

    let tags = analyzer.predict_tags_capped(&title, &description, max);
    if args.json
    {
        println!("{}", serde_json::to_string(&json!({ "tags": tags }))?);
        return Ok(());
    }

    for tag in &tags
    {
        println!("{tag}");
    }
    Ok(())
}

pub fn catalog_run(
    args: CatalogArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let catalog = match &args.file
    {
        Some(path) => std::borrow::Cow::Owned(TagCatalog::load(path)?),
        None => cfg.catalog()?,
    };

    if args.json
    {
        println!("{}", serde_json::to_string_pretty(&*catalog)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct CategoryRow
    {
        tag: String,
        keywords: usize,
        examples: String,
    }

    let rows: Vec<CategoryRow> = catalog
        .categories()
        .iter()
        .map(|c| CategoryRow {
            tag: c.name.clone(),
            keywords: c.keywords.len(),
            examples: ListFmt::join_or_dash(&c.keywords[..c.keywords.len().min(4)]),
        })
        .collect();

    if !ctx.quiet
    {
        println!("{} {}", Paint::strong("catalog version", ctx.no_color), Paint::accent(catalog.version(), ctx.no_color));
    }
    println!("{}", Table::new(rows));
    Ok(())
}

pub fn tfidf_run(
    args: TfidfArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = config::load_or_default();
    let store = DoubtStore::open(cfg.resolve_store(args.store.as_deref())?);
    let text = read_text_arg(&args.text)?;

    let documents: Vec<String> = store
        .load_shared()?
        .iter()
        .map(|r| r.entry().text())
        .collect();

    let analyzer = ContentAnalyzer::builtin();
    let mut terms = analyzer.tfidf(&text, &documents);
    terms.truncate(args.max);

    if args.json
    {
        let out = json!({ "documents": documents.len(), "terms": terms });
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    if documents.is_empty() && !ctx.quiet
    {
        eprintln!("{}", Paint::warn("Store is empty; weights are term frequencies", ctx.no_color));
    }
    for t in &terms
    {
        println!("{}  {}", ScoreFmt::score(t.weight), t.term);
    }
    Ok(())
}
