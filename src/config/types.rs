use std::collections::BTreeMap;

use serde::Deserialize;

use crate::args::{FlagConfig, Registry, RegistryError};

/// On-disk flag registry.
///
/// ```toml
/// [flags.foo]
/// long = "foo"
/// short = "f"
/// value = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagsFile {
    /// Symbol → flag configuration.
    #[serde(default)]
    pub flags: BTreeMap<String, FlagConfig>,
}

impl FlagsFile {
    /// Validate every entry and build a registry from them.
    pub fn into_registry(self) -> Result<Registry, RegistryError> {
        Registry::from_configs(self.flags)
    }
}
