//! Configuration warning value object.

use std::path::PathBuf;

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Produced while loading the JSON config file, e.g. for unknown keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}
