//! Utility helpers organized by small, focused structs.
//! All functions are associated fns to keep call sites
//! ergonomic, testable, and discoverable.

use itertools::Itertools;
use owo_colors::OwoColorize;

/// Terminal styling that honors `--no-color`
pub struct Paint;

impl Paint
{
    /// Green text, or plain when color is disabled
    pub fn ok(
        s: &str,
        no_color: bool,
    ) -> String
    {
        if no_color
        {
            s.to_string()
        }
        else
        {
            s.green()
                .to_string()
        }
    }

    /// Yellow text, or plain when color is disabled
    pub fn warn(
        s: &str,
        no_color: bool,
    ) -> String
    {
        if no_color
        {
            s.to_string()
        }
        else
        {
            s.yellow()
                .to_string()
        }
    }

    /// Bold text, or plain when color is disabled
    pub fn strong(
        s: &str,
        no_color: bool,
    ) -> String
    {
        if no_color
        {
            s.to_string()
        }
        else
        {
            s.bold()
                .to_string()
        }
    }

    /// Cyan text, or plain when color is disabled
    pub fn accent(
        s: &str,
        no_color: bool,
    ) -> String
    {
        if no_color
        {
            s.to_string()
        }
        else
        {
            s.cyan()
                .to_string()
        }
    }
}

/// Number formatting for scores
pub struct ScoreFmt;

impl ScoreFmt
{
    /// Fixed three-decimal rendering used in human output
    pub fn score(s: f64) -> String
    {
        format!("{s:.3}")
    }

    /// Percentage with one decimal
    pub fn percent(s: f64) -> String
    {
        format!("{:.1}%", s * 100.0)
    }
}

/// List joining for human output
pub struct ListFmt;

impl ListFmt
{
    /// Comma-separated list, or a dash for an empty one
    pub fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String
    {
        if items.is_empty()
        {
            return "-".to_string();
        }

        items
            .iter()
            .map(|s| AsRef::<str>::as_ref(s))
            .join(", ")
    }
}
