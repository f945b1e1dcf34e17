//! Flag classifier — one raw token → one classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::args::error::ParseError;
use crate::args::registry::{FlagShape, Registry};
use crate::args::symbol::Symbol;

/// Literal that ends flag parsing.
pub const SEPARATOR: &str = "--";

/// Runs of word characters, each optionally followed by one dash, ending in a word run.
const LONG_NAME: &str = r"(?:[A-Za-z0-9_]+-?)*[A-Za-z0-9_]+";

static LONG_FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^--(?P<flag>{LONG_NAME})")).expect("long flag pattern compiles")
});

static SHORT_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-(?P<flag>[A-Za-z0-9_])").expect("short flag pattern compiles"));

static LONG_NAME_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^{LONG_NAME}$")).expect("long name pattern compiles"));

/// Outcome of classifying a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Exactly `--`.
    Separator,
    /// Does not look like a flag; a positional argument.
    NotAFlag,
    /// Flag-shaped but not registered. Carries the raw token.
    UnknownFlag(String),
    /// Value carried in the token itself (`--foo=x`, `-f=x`, `-fx`).
    ValueInline(Symbol, String),
    /// Value is the following token (`--foo x`, `-f x`).
    ValueFromNextToken(Symbol),
    /// Boolean switch, nothing trailing.
    BooleanSet(Symbol),
    /// Boolean short switch with more characters after it (`-abc`).
    BooleanSetWithTrailing(Symbol, String),
}

/// True if the token leads with `-`.
pub fn is_flag_shaped(token: &str) -> bool {
    token.starts_with('-')
}

pub(crate) fn is_long_name(name: &str) -> bool {
    LONG_NAME_EXACT.is_match(name)
}

pub(crate) fn is_short_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Classify `token` against `registry`.
///
/// Pure: no state is touched. Flag-shaped tokens that fit neither grammar are
/// rejected rather than passed through as positional arguments.
pub fn check_flag(token: &str, registry: &Registry) -> Result<Classification, ParseError> {
    if token == SEPARATOR {
        return Ok(Classification::Separator);
    }

    let Some((shape, flag)) = match_shape(token) else {
        if is_flag_shaped(token) {
            return Err(ParseError::MalformedFlagSyntax {
                token: token.to_string(),
            });
        }
        return Ok(Classification::NotAFlag);
    };

    let Some(spec) = registry.lookup(shape, flag) else {
        return Ok(Classification::UnknownFlag(token.to_string()));
    };

    let prefix = match shape {
        FlagShape::Long => format!("--{flag}"),
        FlagShape::Short => format!("-{flag}"),
    };
    let Some(rest) = token.strip_prefix(prefix.as_str()) else {
        return Err(ParseError::PrefixMismatch {
            token: token.to_string(),
            expected: prefix,
        });
    };

    let symbol = spec.symbol.clone();

    if spec.requires_value {
        if rest.is_empty() {
            return Ok(Classification::ValueFromNextToken(symbol));
        }
        if let Some(value) = rest.strip_prefix('=') {
            if value.is_empty() {
                return Err(ParseError::MissingValueDelimiter {
                    token: token.to_string(),
                });
            }
            return Ok(Classification::ValueInline(symbol, value.to_string()));
        }
        match shape {
            // smashed value: -f5
            FlagShape::Short => Ok(Classification::ValueInline(symbol, rest.to_string())),
            FlagShape::Long => Err(ParseError::TrailingText {
                flag: prefix,
                token: token.to_string(),
            }),
        }
    } else {
        if rest.is_empty() {
            return Ok(Classification::BooleanSet(symbol));
        }
        match shape {
            FlagShape::Short if !rest.starts_with('=') => {
                Ok(Classification::BooleanSetWithTrailing(symbol, rest.to_string()))
            }
            _ => Err(ParseError::UnexpectedValue {
                flag: prefix,
                token: token.to_string(),
            }),
        }
    }
}

/// Match the long grammar first, then the short one.
fn match_shape(token: &str) -> Option<(FlagShape, &str)> {
    [(FlagShape::Long, &*LONG_FLAG), (FlagShape::Short, &*SHORT_FLAG)]
        .into_iter()
        .find_map(|(shape, re)| {
            re.captures(token)
                .and_then(|caps| caps.name("flag"))
                .map(|m| (shape, m.as_str()))
        })
}
