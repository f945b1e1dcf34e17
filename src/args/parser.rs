//! Parse driver — drains tokens from the front until a positional argument,
//! a separator, or the end of input.

use std::collections::{BTreeMap, VecDeque};

use serde::{Serialize, Serializer};

use crate::args::classifier::{check_flag, is_flag_shaped, Classification};
use crate::args::error::{ParseError, RegistryError};
use crate::args::registry::{FlagConfig, Registry};
use crate::args::smash::{parse_smashed, SmashedFlag};
use crate::args::symbol::Symbol;

/// Parsed value of one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean switch that was present.
    Switch,
    Value(String),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Switch => None,
            OptionValue::Value(v) => Some(v.as_str()),
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, OptionValue::Switch)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Switch => serializer.serialize_bool(true),
            OptionValue::Value(v) => serializer.serialize_str(v),
        }
    }
}

/// Symbol → parsed value.
pub type Options = BTreeMap<Symbol, OptionValue>;

/// Result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Tokens not consumed: the first positional and everything after it, or
    /// the separator and everything after it.
    pub remaining: Vec<String>,
    pub options: Options,
}

/// Flag parser bound to one registry.
///
/// The registry is only read while parsing, so one parser can serve any
/// number of independent parses.
#[derive(Debug, Clone, Default)]
pub struct OptionParser {
    registry: Registry,
}

impl OptionParser {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn from_configs<I, S>(configs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, FlagConfig)>,
        S: Into<String>,
    {
        Ok(Self::new(Registry::from_configs(configs)?))
    }

    /// Replace the flag set; the index is re-derived.
    pub fn set_flags<I, S>(&mut self, configs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (S, FlagConfig)>,
        S: Into<String>,
    {
        self.registry.replace(configs)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn check_flag(&self, token: &str) -> Result<Classification, ParseError> {
        check_flag(token, &self.registry)
    }

    pub fn parse_smashed(&self, cluster: &str) -> Result<Vec<SmashedFlag>, ParseError> {
        parse_smashed(cluster, &self.registry)
    }

    /// Parse `tokens` left to right.
    ///
    /// Stops at the first positional argument or at `--`; neither is consumed.
    /// Flags after a positional argument are not looked at.
    pub fn parse<I, S>(&self, tokens: I) -> Result<ParseResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<String> = tokens.into_iter().map(Into::into).collect();
        let mut options = Options::new();

        while let Some(head) = queue.front() {
            if !is_flag_shaped(head) {
                tracing::debug!(token = %head, "Stopped at positional argument");
                break;
            }

            let flag = head.clone();
            let classification = self.check_flag(head)?;
            tracing::trace!(token = %flag, ?classification, "Classified token");

            match classification {
                Classification::Separator => {
                    tracing::debug!(remaining = queue.len(), "Stopped at separator");
                    break;
                }
                Classification::NotAFlag => break,
                Classification::UnknownFlag(raw) => {
                    return Err(ParseError::UnknownFlag { flag: raw });
                }
                Classification::ValueInline(symbol, value) => {
                    queue.pop_front();
                    record(&mut options, symbol, OptionValue::Value(value));
                }
                Classification::ValueFromNextToken(symbol) => {
                    queue.pop_front();
                    let value = pop_value(&mut queue, &flag)?;
                    record(&mut options, symbol, OptionValue::Value(value));
                }
                Classification::BooleanSet(symbol) => {
                    queue.pop_front();
                    record(&mut options, symbol, OptionValue::Switch);
                }
                Classification::BooleanSetWithTrailing(symbol, cluster) => {
                    queue.pop_front();
                    record(&mut options, symbol, OptionValue::Switch);
                    for smashed in self.parse_smashed(&cluster)? {
                        match smashed {
                            SmashedFlag::Switch(sym) => record(&mut options, sym, OptionValue::Switch),
                            SmashedFlag::Value(sym, value) => {
                                record(&mut options, sym, OptionValue::Value(value))
                            }
                            SmashedFlag::Pending(sym) => {
                                let value = pop_value(&mut queue, &self.short_spelling(&sym))?;
                                record(&mut options, sym, OptionValue::Value(value));
                            }
                        }
                    }
                }
            }
        }

        Ok(ParseResult {
            remaining: queue.into(),
            options,
        })
    }

    /// `-c` for a flag decoded out of a cluster.
    fn short_spelling(&self, symbol: &Symbol) -> String {
        self.registry
            .spec(symbol.as_str())
            .and_then(|spec| spec.short)
            .map(|c| format!("-{c}"))
            .unwrap_or_else(|| symbol.to_string())
    }
}

/// Take the next token as a value for `flag`.
///
/// A flag-shaped token is never taken as a value, even one that reads like a
/// negative number; such values have to be given inline.
fn pop_value(queue: &mut VecDeque<String>, flag: &str) -> Result<String, ParseError> {
    match queue.pop_front() {
        Some(next) if !is_flag_shaped(&next) => Ok(next),
        found => Err(ParseError::MissingValue {
            flag: flag.to_string(),
            found,
        }),
    }
}

fn record(options: &mut Options, symbol: Symbol, value: OptionValue) {
    if let Some(previous) = options.insert(symbol, value) {
        tracing::debug!(?previous, "Flag given more than once, keeping the last value");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> OptionParser {
        OptionParser::from_configs([
            ("foo", FlagConfig::valued("foo", 'f')),
            ("bar", FlagConfig::switch("bar", 'b')),
            ("barbaz1", FlagConfig::switch("bar-baz", 'a')),
        ])
        .unwrap()
    }

    fn value(s: &str) -> OptionValue {
        OptionValue::Value(s.to_string())
    }

    #[test]
    fn empty_input_is_valid() {
        let result = parser().parse(Vec::<String>::new()).unwrap();
        assert_eq!(result, ParseResult::default());
    }

    #[test]
    fn pending_smashed_value_takes_next_token() {
        let result = parser().parse(["-abf", "5", "rest"]).unwrap();
        assert_eq!(result.remaining, vec!["rest"]);
        assert_eq!(result.options.get("foo"), Some(&value("5")));
        assert_eq!(result.options.get("bar"), Some(&OptionValue::Switch));
        assert_eq!(result.options.get("barbaz1"), Some(&OptionValue::Switch));
    }

    #[test]
    fn pending_smashed_value_requires_a_token() {
        let err = parser().parse(["-bf"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                flag: "-f".to_string(),
                found: None
            }
        );
    }

    #[test]
    fn pending_smashed_value_error_names_the_short_flag() {
        let err = parser().parse(["-bf", "--"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                flag: "-f".to_string(),
                found: Some("--".to_string())
            }
        );
        assert_eq!(err.to_string(), "flag -f needs a value; got --");
    }

    #[test]
    fn switch_and_value_accessors() {
        let result = parser().parse(["-b", "--foo", "x"]).unwrap();
        let bar = result.options.get("bar").unwrap();
        let foo = result.options.get("foo").unwrap();
        assert!(bar.is_switch());
        assert_eq!(bar.as_str(), None);
        assert!(!foo.is_switch());
        assert_eq!(foo.as_str(), Some("x"));
    }

    #[test]
    fn last_occurrence_wins() {
        let result = parser().parse(["--foo=1", "-f", "2"]).unwrap();
        assert_eq!(result.options.get("foo"), Some(&value("2")));
    }

    #[test]
    fn negative_number_is_not_taken_as_next_value() {
        let err = parser().parse(["--foo", "-5"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { found: Some(ref t), .. } if t == "-5"));

        let result = parser().parse(["--foo=-5", "-f-6"]).unwrap();
        assert_eq!(result.options.get("foo"), Some(&value("-6")));
    }

    #[test]
    fn empty_token_stops_parsing() {
        let result = parser().parse(["-b", "", "--foo"]).unwrap();
        assert_eq!(result.remaining, vec!["", "--foo"]);
    }

    #[test]
    fn set_flags_replaces_registry() {
        let mut parser = parser();
        parser
            .set_flags([("verbose", FlagConfig::switch("verbose", 'v'))])
            .unwrap();
        assert!(parser.parse(["--bar"]).is_err());
        assert_eq!(
            parser.parse(["-v"]).unwrap().options.get("verbose"),
            Some(&OptionValue::Switch)
        );
    }

    #[test]
    fn serializes_switches_as_true() {
        let result = parser().parse(["-b", "--foo", "x", "pos"]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "remaining": ["pos"],
                "options": { "bar": true, "foo": "x" }
            })
        );
    }
}
