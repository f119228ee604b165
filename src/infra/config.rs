use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::engine::EngineSettings;
use crate::analysis::tags::TagCatalog;
use crate::cli::{AppContext, InitArgs};
use crate::core::submit::SubmissionLimits;

/// Default location of the doubt store
pub const DEFAULT_STORE_PATH: &str = ".doubtsift/doubts.jsonl";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// JSON-lines file holding submitted doubts
    pub store_path: PathBuf,

    /// Optional TOML tag catalog replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Engine tunables
    pub analysis: EngineSettings,

    /// Submission field bounds
    pub limits: SubmissionLimits,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            catalog_path: None,
            analysis: EngineSettings::default(),
            limits: SubmissionLimits::default(),
        }
    }
}

impl Config
{
    /// Store path from the CLI override or config, with `~`/`$VAR` expanded
    pub fn resolve_store(
        &self,
        cli_override: Option<&Path>,
    ) -> Result<PathBuf>
    {
        let raw = cli_override.unwrap_or(&self.store_path);
        expand_path(raw)
    }

    /// The configured catalog, or the built-in one
    pub fn catalog(&self) -> Result<Cow<'static, TagCatalog>>
    {
        match &self.catalog_path
        {
            Some(p) =>
            {
                let path = expand_path(p)?;
                Ok(Cow::Owned(TagCatalog::load(&path)?))
            }
            None => Ok(Cow::Borrowed(TagCatalog::builtin())),
        }
    }
}

fn expand_path(p: &Path) -> Result<PathBuf>
{
    let s = p.to_string_lossy();
    let expanded = shellexpand::full(&s)
        .with_context(|| format!("Failed to expand path {}", p.display()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["doubtsift.toml", "doubtsift.yaml", "doubtsift.json", ".doubtsift.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Environment overrides: DOUBTSIFT_STORE_PATH, DOUBTSIFT_ANALYSIS__MAX_TAGS, ...
    builder = builder.add_source(
        config::Environment::with_prefix("DOUBTSIFT")
            .prefix_separator("_")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

/// Like [`load_config`], but a broken config only logs a warning
pub fn load_or_default() -> Config
{
    load_config().unwrap_or_else(|e| {
        warn!("{e:#}; falling back to default configuration");
        Config::default()
    })
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("doubtsift.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        print!("{toml_string}");
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
