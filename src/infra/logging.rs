//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::AppContext;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "DOUBTSIFT_LOG";

/// Default filter directive for the given global flags
pub fn default_directive(ctx: &AppContext) -> &'static str
{
    if ctx.verbose
    {
        "debug"
    }
    else if ctx.quiet
    {
        "error"
    }
    else
    {
        "warn"
    }
}

/// Install a stderr fmt subscriber; `DOUBTSIFT_LOG` overrides the flags.
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn init(ctx: &AppContext)
{
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(ctx)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!ctx.no_color)
        .try_init();
}
