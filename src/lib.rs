//! Registry-driven command-line flag parser.
//!
//! Flags are declared up front (long name, short name, whether a value is
//! required). Parsing classifies tokens one at a time, decodes smashed short
//! flags such as `-abf5`, and stops at the first positional argument or `--`.
//!
//! ```
//! use healthy_options::args::{FlagConfig, OptionParser, OptionValue};
//!
//! let parser = OptionParser::from_configs([
//!     ("foo", FlagConfig::valued("foo", 'f')),
//!     ("bar", FlagConfig::switch("bar", 'b')),
//! ])
//! .unwrap();
//!
//! let result = parser.parse(["-bf5", "input.txt"]).unwrap();
//! assert_eq!(result.remaining, vec!["input.txt"]);
//! assert_eq!(result.options.get("bar"), Some(&OptionValue::Switch));
//! assert_eq!(result.options.get("foo").and_then(|v| v.as_str()), Some("5"));
//! ```

pub mod args;
pub mod config;
pub mod logging;
