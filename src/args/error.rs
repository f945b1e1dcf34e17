//! Error types for flag registration and argument parsing.

use thiserror::Error;

/// Errors raised while building a flag registry.
///
/// All of these surface before any parse is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Symbol is not an identifier
    #[error("symbol expected for '{symbol}'")]
    InvalidSymbol { symbol: String },

    /// Long name does not match the long-flag grammar
    #[error("flag '{symbol}': invalid long name '{long}'")]
    InvalidLongName { symbol: String, long: String },

    /// Short name is not a single word character
    #[error("flag '{symbol}': invalid short name '{short}'")]
    InvalidShortName { symbol: String, short: char },

    /// Neither a long nor a short spelling was given
    #[error("flag '{symbol}' needs a long or a short name")]
    MissingName { symbol: String },

    #[error("flag '{symbol}' is registered twice")]
    DuplicateSymbol { symbol: String },

    #[error("long name '--{long}' of '{symbol}' is already used by '{existing}'")]
    DuplicateLong {
        symbol: String,
        long: String,
        existing: String,
    },

    #[error("short name '-{short}' of '{symbol}' is already used by '{existing}'")]
    DuplicateShort {
        symbol: String,
        short: char,
        existing: String,
    },
}

/// Errors that abort a parse.
///
/// Every variant is terminal: the driver stops on the first one and hands it
/// to the caller without a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Flag-shaped token that is not registered
    #[error("unrecognized flag: {flag}")]
    UnknownFlag { flag: String },

    /// Starts with `-` but matches neither the long nor the short grammar
    #[error("malformed flag: {token}")]
    MalformedFlagSyntax { token: String },

    /// Value-requiring flag with nothing left to take a value from
    #[error("flag {flag} needs a value; got {}", .found.as_deref().unwrap_or("end of arguments"))]
    MissingValue { flag: String, found: Option<String> },

    /// Boolean flag given a value
    #[error("{flag} does not take a value: {token}")]
    UnexpectedValue { flag: String, token: String },

    /// `=` with nothing after it
    #[error("a value is required after = ({token})")]
    MissingValueDelimiter { token: String },

    /// Long value flag followed by text that is not `=value`
    #[error("could not determine value for {flag} in {token}")]
    TrailingText { flag: String, token: String },

    /// Character inside a smashed cluster is not a registered short flag
    #[error("unknown flag smashed in: {flag} in {cluster}")]
    UnknownSmashedFlag { flag: char, cluster: String },

    /// Token prefix disagrees with what the grammar matched
    #[error("internal error: expected {token} to lead with {expected}")]
    PrefixMismatch { token: String, expected: String },
}

impl ParseError {
    /// Stable error type string for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnknownFlag { .. } => "unknown_flag",
            ParseError::MalformedFlagSyntax { .. } => "malformed_flag_syntax",
            ParseError::MissingValue { .. } => "missing_value",
            ParseError::UnexpectedValue { .. } => "unexpected_value",
            ParseError::MissingValueDelimiter { .. } => "missing_value_delimiter",
            ParseError::TrailingText { .. } => "trailing_text",
            ParseError::UnknownSmashedFlag { .. } => "unknown_smashed_flag",
            ParseError::PrefixMismatch { .. } => "internal_error",
        }
    }
}
