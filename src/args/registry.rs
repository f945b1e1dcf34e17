//! Flag registry — the validated set of recognized flags plus its lookup index.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::args::classifier::{is_long_name, is_short_name};
use crate::args::error::RegistryError;
use crate::args::symbol::Symbol;

/// Lexical shape a flag was spelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    /// `--name`
    Long,
    /// `-c`
    Short,
}

/// Configuration record supplied by the caller for one flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagConfig {
    /// Long name without the `--` prefix (e.g. `bar-baz`).
    #[serde(default)]
    pub long: Option<String>,
    /// Short name without the `-` prefix.
    #[serde(default)]
    pub short: Option<char>,
    /// Whether the flag must be paired with a value.
    #[serde(default, alias = "requires_value")]
    pub value: bool,
}

impl FlagConfig {
    /// Boolean switch with a long and a short spelling.
    pub fn switch(long: &str, short: char) -> Self {
        Self {
            long: Some(long.to_string()),
            short: Some(short),
            value: false,
        }
    }

    /// Value-requiring flag with a long and a short spelling.
    pub fn valued(long: &str, short: char) -> Self {
        Self {
            long: Some(long.to_string()),
            short: Some(short),
            value: true,
        }
    }
}

/// One registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub symbol: Symbol,
    pub long: Option<String>,
    pub short: Option<char>,
    pub requires_value: bool,
}

/// Reverse lookups from spelling to symbol.
///
/// Derived from the flag set; never edited on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    pub long: BTreeMap<String, Symbol>,
    pub short: BTreeMap<char, Symbol>,
}

impl Index {
    /// Build both lookups from a set of specs.
    pub fn build<'a>(specs: impl IntoIterator<Item = &'a FlagSpec>) -> Self {
        let mut index = Index::default();
        for spec in specs {
            if let Some(long) = &spec.long {
                index.long.insert(long.clone(), spec.symbol.clone());
            }
            if let Some(short) = spec.short {
                index.short.insert(short, spec.symbol.clone());
            }
        }
        index
    }
}

/// Validated flag set owned by a parser.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: BTreeMap<Symbol, FlagSpec>,
    index: Index,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(symbol, config)` pairs, validating each one.
    pub fn from_configs<I, S>(configs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, FlagConfig)>,
        S: Into<String>,
    {
        let mut registry = Registry::new();
        for (name, config) in configs {
            registry.insert(name, config)?;
        }
        Ok(registry)
    }

    /// Register one flag and re-derive the index.
    ///
    /// On error the registry is left unchanged.
    pub fn insert(&mut self, name: impl Into<String>, config: FlagConfig) -> Result<(), RegistryError> {
        let symbol = Symbol::new(name)?;
        let spec = self.validate(symbol, config)?;
        tracing::trace!(symbol = %spec.symbol, long = ?spec.long, short = ?spec.short, "Registered flag");
        self.specs.insert(spec.symbol.clone(), spec);
        self.reindex();
        Ok(())
    }

    /// Swap in a whole new flag set.
    ///
    /// The current set is kept if any record fails validation.
    pub fn replace<I, S>(&mut self, configs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (S, FlagConfig)>,
        S: Into<String>,
    {
        *self = Registry::from_configs(configs)?;
        Ok(())
    }

    /// Re-derive the index from the current flag set.
    pub fn reindex(&mut self) {
        self.index = Index::build(self.specs.values());
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn spec(&self, symbol: &str) -> Option<&FlagSpec> {
        self.specs.get(symbol)
    }

    /// Find the flag registered under `name` for the given shape.
    pub fn lookup(&self, shape: FlagShape, name: &str) -> Option<&FlagSpec> {
        let symbol = match shape {
            FlagShape::Long => self.index.long.get(name),
            FlagShape::Short => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.index.short.get(&c),
                    _ => None,
                }
            }
        }?;
        self.specs.get(symbol)
    }

    pub fn by_short(&self, short: char) -> Option<&FlagSpec> {
        self.index.short.get(&short).and_then(|sym| self.specs.get(sym))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn validate(&self, symbol: Symbol, config: FlagConfig) -> Result<FlagSpec, RegistryError> {
        if self.specs.contains_key(&symbol) {
            return Err(RegistryError::DuplicateSymbol {
                symbol: symbol.to_string(),
            });
        }
        if config.long.is_none() && config.short.is_none() {
            return Err(RegistryError::MissingName {
                symbol: symbol.to_string(),
            });
        }

        if let Some(long) = &config.long {
            if !is_long_name(long) {
                return Err(RegistryError::InvalidLongName {
                    symbol: symbol.to_string(),
                    long: long.clone(),
                });
            }
            if let Some(existing) = self.index.long.get(long) {
                return Err(RegistryError::DuplicateLong {
                    symbol: symbol.to_string(),
                    long: long.clone(),
                    existing: existing.to_string(),
                });
            }
        }

        if let Some(short) = config.short {
            if !is_short_name(short) {
                return Err(RegistryError::InvalidShortName {
                    symbol: symbol.to_string(),
                    short,
                });
            }
            if let Some(existing) = self.index.short.get(&short) {
                return Err(RegistryError::DuplicateShort {
                    symbol: symbol.to_string(),
                    short,
                    existing: existing.to_string(),
                });
            }
        }

        Ok(FlagSpec {
            symbol,
            long: config.long,
            short: config.short,
            requires_value: config.value,
        })
    }
}
