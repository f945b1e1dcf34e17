//! Flag parsing pipeline.
//!
//! ```text
//! FlagConfig map → Registry (+ Index) ─┐
//!                                       v
//! tokens → parse ── check_flag ──→ Classification
//!            │          └─ BooleanSetWithTrailing → parse_smashed
//!            v
//!       ParseResult { remaining, options }
//! ```
//!
//! The registry is validated once, up front. Each parse then walks the tokens
//! from the front and stops at the first positional argument or `--`.

mod classifier;
mod error;
mod parser;
mod registry;
mod smash;
mod symbol;

pub use classifier::{check_flag, is_flag_shaped, Classification, SEPARATOR};
pub use error::{ParseError, RegistryError};
pub use parser::{OptionParser, OptionValue, Options, ParseResult};
pub use registry::{FlagConfig, FlagShape, FlagSpec, Index, Registry};
pub use smash::{parse_smashed, SmashedFlag};
pub use symbol::Symbol;
