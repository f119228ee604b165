//! Text normalization into comparable word tokens.

/// Lowercase `text` and split it into word tokens.
///
/// After case folding, every character outside `[a-z0-9_]` acts as a separator,
/// so punctuation never survives into a token and separator runs never produce
/// empty fragments. Token order follows the input, which keyword tie-breaking
/// relies on downstream.
pub fn tokenize(text: &str) -> Vec<String>
{
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|frag| !frag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// ASCII word class: letters, digits and underscore
#[inline]
fn is_word_char(c: char) -> bool
{
    c.is_ascii_alphanumeric() || c == '_'
}
