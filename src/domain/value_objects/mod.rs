//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod source;

pub use config_warning::ConfigWarning;
pub use source::{Source, SourceKind};
