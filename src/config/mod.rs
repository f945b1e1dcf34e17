mod loader;
mod types;

pub use loader::{load_registry, ConfigError};
pub use types::FlagsFile;
