//! Shell completion scripts for `dsift`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell as Generator;

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "dsift";

impl Shell
{
    fn generator(&self) -> Generator
    {
        match self
        {
            Shell::Bash => Generator::Bash,
            Shell::Zsh => Generator::Zsh,
            Shell::Fish => Generator::Fish,
            Shell::PowerShell => Generator::PowerShell,
            Shell::Elvish => Generator::Elvish,
        }
    }
}

/// Write the completion script for `shell` into `out`
pub fn render(
    shell: &Shell,
    out: &mut dyn Write,
)
{
    clap_complete::generate(shell.generator(), &mut Cli::command(), BIN_NAME, out);
}

fn write_into(
    shell: &Shell,
    dir: &Path,
) -> Result<PathBuf>
{
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    clap_complete::generate_to(shell.generator(), &mut Cli::command(), BIN_NAME, dir)
        .context("Failed to write completion script")
}

pub fn run(
    args: CompletionsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    if args.stdout
    {
        render(&args.shell, &mut std::io::stdout().lock());
        return Ok(());
    }

    let Some(dir) = args.out_dir
    else
    {
        anyhow::bail!("--out-dir is required unless --stdout is set");
    };

    if ctx.dry_run
    {
        println!("Would write {} completion into {}", args.shell.generator(), dir.display());
        return Ok(());
    }

    let path = write_into(&args.shell, &dir)?;
    if !ctx.quiet
    {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn bash_script_names_the_binary_and_subcommands()
    {
        let mut buf = Vec::new();
        render(&Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();

        assert!(script.contains("dsift"));
        assert!(script.contains("submit"));
        assert!(script.contains("tfidf"));
    }

    #[test]
    fn out_dir_receives_a_file()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = write_into(&Shell::Fish, &dir.path().join("comp")).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "dsift.fish");
    }
}
