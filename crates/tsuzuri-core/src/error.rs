use thiserror::Error;

/// Errors surfaced by the strict parsing API.
///
/// Ordinary unparseable names are not errors for [`crate::FansubParser::parse`];
/// these variants only appear through [`crate::FansubParser::try_parse`] and
/// parser construction.
#[derive(Debug, Error)]
pub enum TsuzuriError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// No entity grammar matched the name.
    #[error("no entity grammar matched input: {input:?}")]
    Unrecognized {
        /// The input that could not be parsed.
        input: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for tsuzuri operations.
pub type Result<T> = std::result::Result<T, TsuzuriError>;
