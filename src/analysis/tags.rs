//! Keyword-category tag prediction.
//!
//! A versioned catalog maps tag names to representative keywords. Each category
//! accumulates additive weights for exact token hits, extracted-keyword hits and
//! loose substring overlap; positive scores become tag predictions.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::analysis::error::AnalysisError;
use crate::analysis::keywords::extract_keywords;
use crate::analysis::stopwords::StopwordSet;
use crate::analysis::tokenizer::tokenize;

/// Default number of predicted tags
pub const DEFAULT_MAX_TAGS: usize = 5;

/// Number of extracted keywords consulted for the keyword bonus
pub const DEFAULT_KEYWORD_POOL: usize = 20;

/// Added when a category keyword occurs as a token
pub const EXACT_MATCH_WEIGHT: f64 = 2.0;

/// Added when a category keyword is among the text's extracted keywords
pub const KEYWORD_MATCH_WEIGHT: f64 = 3.0;

/// Added per token that is a substring of the keyword or contains it
pub const PARTIAL_MATCH_WEIGHT: f64 = 0.5;

/// Version label of the compiled-in catalog
pub const BUILTIN_CATALOG_VERSION: &str = "1";

/// Shortest and longest accepted tag, in characters
pub const TAG_MIN_CHARS: usize = 2;
pub const TAG_MAX_CHARS: usize = 30;

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    ("dsa", &[
        "algorithm", "data", "structure", "array", "linked", "list", "tree", "graph", "stack",
        "queue", "sorting", "searching", "binary", "heap", "hash", "dp", "dynamic",
        "programming", "recursion", "greedy", "backtracking", "complexity",
    ]),
    ("oop", &[
        "object", "oriented", "class", "inheritance", "polymorphism", "encapsulation",
        "abstraction", "interface", "constructor", "destructor", "method", "attribute",
    ]),
    ("dbms", &[
        "database", "sql", "query", "table", "join", "primary", "key", "foreign",
        "normalization", "index", "transaction", "acid", "relation", "schema",
    ]),
    ("web-development", &[
        "html", "css", "javascript", "react", "angular", "vue", "node", "express", "frontend",
        "backend", "web", "dom", "api", "rest",
    ]),
    ("java", &[
        "java", "jvm", "spring", "hibernate", "servlet", "jsp", "multithreading", "exception",
        "collections", "stream",
    ]),
    ("python", &[
        "python", "django", "flask", "pandas", "numpy", "matplotlib", "pip", "virtualenv",
        "decorator", "generator",
    ]),
    ("sql", &[
        "select", "insert", "update", "delete", "join", "where", "group", "order", "having",
        "aggregate", "subquery",
    ]),
    ("os", &[
        "operating", "system", "process", "thread", "scheduling", "memory", "virtual", "paging",
        "segmentation", "deadlock", "semaphore", "mutex",
    ]),
    ("networking", &[
        "network", "tcp", "ip", "http", "https", "dns", "routing", "protocol", "socket", "port",
        "firewall", "osi", "layer",
    ]),
    ("aptitude", &[
        "aptitude", "logical", "reasoning", "puzzle", "probability", "permutation",
        "combination", "percentage", "ratio", "time", "speed", "distance",
    ]),
    ("machine-learning", &[
        "machine", "learning", "neural", "network", "deep", "ai", "model", "training",
        "classification", "regression", "clustering",
    ]),
    ("git", &[
        "git", "github", "version", "control", "commit", "branch", "merge", "pull", "push",
        "clone", "repository",
    ]),
];

static BUILTIN: LazyLock<TagCatalog> = LazyLock::new(|| TagCatalog {
    version: BUILTIN_CATALOG_VERSION.to_string(),
    categories: BUILTIN_CATEGORIES
        .iter()
        .map(|(name, keywords)| TagCategory {
            name: (*name).to_string(),
            keywords: keywords
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        })
        .collect(),
});

/// Additive weights of the tag scoring heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagWeights
{
    pub exact: f64,
    pub keyword: f64,
    pub partial: f64,
}

impl Default for TagWeights
{
    fn default() -> Self
    {
        Self { exact: EXACT_MATCH_WEIGHT, keyword: KEYWORD_MATCH_WEIGHT, partial: PARTIAL_MATCH_WEIGHT }
    }
}

/// A named topic and its representative keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory
{
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered, read-only set of tag categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCatalog
{
    version: String,
    categories: Vec<TagCategory>,
}

impl TagCatalog
{
    /// The compiled-in catalog (12 categories), built once per process
    pub fn builtin() -> &'static TagCatalog
    {
        &BUILTIN
    }

    /// Validate and build a catalog; category order is scoring tie order.
    ///
    /// Keywords are trimmed and lowercased, since tokens always are.
    pub fn new(
        version: impl Into<String>,
        mut categories: Vec<TagCategory>,
    ) -> Result<Self, AnalysisError>
    {
        for cat in &mut categories
        {
            for kw in &mut cat.keywords
            {
                *kw = kw
                    .trim()
                    .to_lowercase();
            }
        }

        let mut seen = HashSet::new();
        for (i, cat) in categories
            .iter()
            .enumerate()
        {
            if cat
                .name
                .trim()
                .is_empty()
            {
                return Err(AnalysisError::invalid(
                    format!("catalog.categories[{i}].name"),
                    "must not be empty",
                ));
            }
            if !seen.insert(
                cat.name
                    .as_str(),
            )
            {
                return Err(AnalysisError::invalid(
                    format!("catalog.categories[{i}].name"),
                    format!("duplicate category '{}'", cat.name),
                ));
            }
            if let Some(k) = cat
                .keywords
                .iter()
                .position(String::is_empty)
            {
                return Err(AnalysisError::invalid(
                    format!("catalog.categories[{i}].keywords[{k}]"),
                    "must not be empty",
                ));
            }
        }

        Ok(Self { version: version.into(), categories })
    }

    /// Parse a TOML catalog artifact
    pub fn from_toml_str(src: &str) -> Result<Self, AnalysisError>
    {
        #[derive(Deserialize)]
        struct Raw
        {
            version: String,
            #[serde(default)]
            categories: Vec<TagCategory>,
        }

        let raw: Raw =
            toml::from_str(src).map_err(|e| AnalysisError::invalid("catalog", e.to_string()))?;
        Self::new(raw.version, raw.categories)
    }

    /// Read and parse a TOML catalog file
    pub fn load(path: &Path) -> anyhow::Result<Self>
    {
        let src = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read tag catalog {}: {e}", path.display())
        })?;
        Ok(Self::from_toml_str(&src)?)
    }

    pub fn version(&self) -> &str
    {
        &self.version
    }

    pub fn categories(&self) -> &[TagCategory]
    {
        &self.categories
    }

    /// Category names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str>
    {
        self.categories
            .iter()
            .map(|c| {
                c.name
                    .as_str()
            })
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&TagCategory>
    {
        self.categories
            .iter()
            .find(|c| c.name == name)
    }

    pub fn len(&self) -> usize
    {
        self.categories
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.categories
            .is_empty()
    }
}

/// One category's accumulated score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagScore
{
    pub tag: String,
    pub score: f64,
}

/// Scores a catalog against free text
#[derive(Debug, Clone, Copy)]
pub struct TagPredictor<'a>
{
    catalog: &'a TagCatalog,
    stopwords: &'a StopwordSet,
    weights: TagWeights,
    keyword_pool: usize,
}

impl<'a> TagPredictor<'a>
{
    pub fn new(
        catalog: &'a TagCatalog,
        stopwords: &'a StopwordSet,
    ) -> Self
    {
        Self { catalog, stopwords, weights: TagWeights::default(), keyword_pool: DEFAULT_KEYWORD_POOL }
    }

    pub fn with_weights(
        mut self,
        weights: TagWeights,
    ) -> Self
    {
        self.weights = weights;
        self
    }

    pub fn with_keyword_pool(
        mut self,
        pool: usize,
    ) -> Self
    {
        self.keyword_pool = pool;
        self
    }

    /// Every category with a positive score, best first (stable on ties).
    ///
    /// The substring bonus compares each keyword against every unfiltered token
    /// in both directions, so short keywords like `ai` or `os` collect credit
    /// from unrelated words. The behavior is kept as observed.
    pub fn score(
        &self,
        title: &str,
        description: &str,
    ) -> Vec<TagScore>
    {
        let text = format!("{title} {description}").to_lowercase();
        let tokens = tokenize(&text);
        let keywords = extract_keywords(&text, self.keyword_pool, self.stopwords);

        let token_set: HashSet<&str> = tokens
            .iter()
            .map(String::as_str)
            .collect();
        let keyword_set: HashSet<&str> = keywords
            .iter()
            .map(String::as_str)
            .collect();

        let mut scored: Vec<TagScore> = self
            .catalog
            .categories()
            .iter()
            .map(|cat| TagScore {
                tag: cat
                    .name
                    .clone(),
                score: self.category_score(cat, &tokens, &token_set, &keyword_set),
            })
            .filter(|s| s.score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Top `max_tags` category names for the submission text
    pub fn predict(
        &self,
        title: &str,
        description: &str,
        max_tags: usize,
    ) -> Vec<String>
    {
        self.score(title, description)
            .into_iter()
            .take(max_tags)
            .map(|s| s.tag)
            .collect()
    }

    fn category_score(
        &self,
        cat: &TagCategory,
        tokens: &[String],
        token_set: &HashSet<&str>,
        keyword_set: &HashSet<&str>,
    ) -> f64
    {
        let mut score = 0.0;
        for kw in &cat.keywords
        {
            let kw = kw.as_str();
            if token_set.contains(kw)
            {
                score += self
                    .weights
                    .exact;
            }
            if keyword_set.contains(kw)
            {
                score += self
                    .weights
                    .keyword;
            }

            let overlaps = tokens
                .iter()
                .filter(|t| t.contains(kw) || kw.contains(t.as_str()))
                .count();
            score += overlaps as f64
                * self
                    .weights
                    .partial;
        }
        score
    }
}

/// Trim and lowercase a user-supplied tag
pub fn normalize_tag(tag: &str) -> String
{
    tag.trim()
        .to_lowercase()
}

/// Normalize `tag` and check it is `min..=max` characters long.
///
/// `field` names the tag in the returned error, e.g. `tags[2]`.
pub fn validate_tag(
    field: &str,
    tag: &str,
    min: usize,
    max: usize,
) -> Result<String, AnalysisError>
{
    let tag = normalize_tag(tag);
    let n = tag
        .chars()
        .count();
    if n < min || n > max
    {
        return Err(AnalysisError::invalid(
            field,
            format!("tag '{tag}' is {n} characters, expected {min}..={max}"),
        ));
    }
    Ok(tag)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn predictor() -> TagPredictor<'static>
    {
        TagPredictor::new(TagCatalog::builtin(), StopwordSet::english())
    }

    #[test]
    fn builtin_catalog_has_twelve_categories_in_order()
    {
        let names: Vec<&str> = TagCatalog::builtin()
            .names()
            .collect();
        assert_eq!(names, vec![
            "dsa",
            "oop",
            "dbms",
            "web-development",
            "java",
            "python",
            "sql",
            "os",
            "networking",
            "aptitude",
            "machine-learning",
            "git",
        ]);
        assert_eq!(TagCatalog::builtin().version(), BUILTIN_CATALOG_VERSION);
    }

    #[test]
    fn dsa_question_ranks_dsa_first_and_drops_git()
    {
        let tags = predictor().predict(
            "I love arrays, linked lists and recursion algorithms",
            "explain sorting and dynamic programming complexity",
            DEFAULT_MAX_TAGS,
        );
        assert_eq!(tags, vec!["dsa", "aptitude", "dbms", "machine-learning", "oop"]);
    }

    #[test]
    fn scores_follow_additive_weights()
    {
        let catalog = TagCatalog::new("t", vec![TagCategory {
            name: "heaps".into(),
            keywords: vec!["heap".into()],
        }])
        .unwrap();
        let p = TagPredictor::new(&catalog, StopwordSet::english());

        // exact (2) + keyword (3) + partial for "heap" and "heaps" (0.5 each)
        let scores = p.score("heap", "heaps");
        assert_eq!(scores, vec![TagScore { tag: "heaps".into(), score: 6.0 }]);
    }

    #[test]
    fn zero_scores_are_excluded()
    {
        let catalog = TagCatalog::new("t", vec![
            TagCategory { name: "db".into(), keywords: vec!["database".into()] },
            TagCategory { name: "net".into(), keywords: vec!["tcp".into()] },
        ])
        .unwrap();
        let p = TagPredictor::new(&catalog, StopwordSet::english());
        assert_eq!(p.predict("database indexing", "btree pages", 5), vec!["db"]);
        assert!(p.predict("", "", 5).is_empty());
    }

    #[test]
    fn ties_keep_catalog_order()
    {
        let catalog = TagCatalog::new("t", vec![
            TagCategory { name: "first".into(), keywords: vec!["mutex".into()] },
            TagCategory { name: "second".into(), keywords: vec!["mutex".into()] },
        ])
        .unwrap();
        let p = TagPredictor::new(&catalog, StopwordSet::english());
        assert_eq!(p.predict("mutex", "locking", 5), vec!["first", "second"]);
        assert_eq!(p.predict("mutex", "locking", 1), vec!["first"]);
    }

    #[test]
    fn custom_weights_change_scores()
    {
        let catalog = TagCatalog::new("t", vec![TagCategory {
            name: "git".into(),
            keywords: vec!["rebase".into()],
        }])
        .unwrap();
        let p = TagPredictor::new(&catalog, StopwordSet::english())
            .with_weights(TagWeights { exact: 1.0, keyword: 0.0, partial: 0.0 });
        assert_eq!(p.score("rebase", "onto main")[0].score, 1.0);
    }

    #[test]
    fn catalog_rejects_duplicate_and_empty_names()
    {
        let dup = TagCatalog::new("t", vec![
            TagCategory { name: "a".into(), keywords: vec![] },
            TagCategory { name: "a".into(), keywords: vec![] },
        ])
        .unwrap_err();
        assert_eq!(dup.field(), "catalog.categories[1].name");

        let empty = TagCatalog::new("t", vec![TagCategory { name: " ".into(), keywords: vec![] }])
            .unwrap_err();
        assert_eq!(empty.field(), "catalog.categories[0].name");
    }

    #[test]
    fn catalog_parses_from_toml()
    {
        let src = r#"
            version = "2"

            [[categories]]
            name = "rust"
            keywords = ["borrow", "lifetime"]
        "#;
        let catalog = TagCatalog::from_toml_str(src).unwrap();
        assert_eq!(catalog.version(), "2");
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog
                .get("rust")
                .unwrap()
                .keywords,
            vec!["borrow", "lifetime"]
        );

        let err = TagCatalog::from_toml_str("categories = 3").unwrap_err();
        assert_eq!(err.field(), "catalog");
    }

    #[test]
    fn tag_validation_bounds()
    {
        let check = |t: &str| validate_tag("tags[0]", t, TAG_MIN_CHARS, TAG_MAX_CHARS);

        assert_eq!(check("os").unwrap(), "os");
        assert_eq!(check("  Web-Development ").unwrap(), "web-development");
        assert_eq!(check("x").unwrap_err().field(), "tags[0]");
        assert!(check(&"t".repeat(31)).is_err());
        assert_eq!(normalize_tag("  GraphQL "), "graphql");
    }

    #[test]
    fn mixed_case_catalog_keywords_still_match()
    {
        let src = r#"
            version = "3"

            [[categories]]
            name = "databases"
            keywords = [" SQL ", "PostgreSQL"]
        "#;
        let catalog = TagCatalog::from_toml_str(src).unwrap();
        assert_eq!(
            catalog
                .get("databases")
                .unwrap()
                .keywords,
            vec!["sql", "postgresql"]
        );

        let p = TagPredictor::new(&catalog, StopwordSet::english());
        // Both keywords hit as exact tokens and as extracted keywords
        let scores = p.score("SQL joins", "slow on PostgreSQL");
        assert_eq!(scores[0].tag, "databases");
        assert!(scores[0].score >= 10.0, "score {}", scores[0].score);
    }
}
