//! Error taxonomy for the content analysis engine.
//!
//! The engine degrades malformed-but-well-typed text to floor values (empty
//! keyword lists, zero similarity). Only caller contract violations surface here.

/// Contract violations raised by the engine and the submission workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError
{
    /// A caller supplied a value that breaks the input contract
    #[error("invalid input: {field}: {reason}")]
    InvalidInput
    {
        /// Path of the offending field, e.g. `title` or `corpus[3].id`
        field: String,
        /// Human-readable explanation
        reason: String,
    },
}

impl AnalysisError
{
    /// Build an `InvalidInput` for `field`
    pub fn invalid(
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self
    {
        Self::InvalidInput { field: field.into(), reason: reason.into() }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str
    {
        match self
        {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn invalid_input_names_field_in_message()
    {
        let err = AnalysisError::invalid("corpus[2].id", "must not be empty");

        assert_eq!(err.field(), "corpus[2].id");
        assert_eq!(err.to_string(), "invalid input: corpus[2].id: must not be empty");
    }
}
