//! Smash decoder — short flags clustered behind a single dash (`-abf5`).

use crate::args::error::ParseError;
use crate::args::registry::Registry;
use crate::args::symbol::Symbol;

/// One flag decoded from a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmashedFlag {
    /// Boolean short flag.
    Switch(Symbol),
    /// Value flag whose value is the rest of the cluster.
    Value(Symbol, String),
    /// Value flag at the very end of the cluster; the value is the next token.
    Pending(Symbol),
}

/// Decode the residual cluster left after the classifier peeled off the
/// leading `-x`.
///
/// A value flag always ends the scan: whatever follows it (minus one leading
/// `=`) is its value. If nothing follows, it is returned as
/// [`SmashedFlag::Pending`], which can only be the last entry.
pub fn parse_smashed(cluster: &str, registry: &Registry) -> Result<Vec<SmashedFlag>, ParseError> {
    let mut decoded = Vec::new();
    let mut rest = cluster;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];

        let Some(spec) = registry.by_short(c) else {
            return Err(ParseError::UnknownSmashedFlag {
                flag: c,
                cluster: cluster.to_string(),
            });
        };

        if !spec.requires_value {
            decoded.push(SmashedFlag::Switch(spec.symbol.clone()));
            continue;
        }

        let value = rest.strip_prefix('=').unwrap_or(rest);
        if value.is_empty() {
            decoded.push(SmashedFlag::Pending(spec.symbol.clone()));
        } else {
            decoded.push(SmashedFlag::Value(spec.symbol.clone(), value.to_string()));
        }
        break;
    }

    Ok(decoded)
}
