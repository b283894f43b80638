//! Output Formatter
//!
//! Concatenates source contents into the output document. The source list
//! order is the only ordering that matters; map iteration order never leaks
//! into the result.

use std::collections::HashMap;

use crate::domain::value_objects::Source;

/// Separator placed between two source blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Delimiter line that introduces one source block (without trailing newline)
pub fn delimiter_line(name: &str) -> String {
    format!("[//]: # \"filepath: {}\"", name)
}

/// Format `sources` in order, looking each one up in `contents`.
///
/// Sources missing from `contents` are skipped. Content bytes are copied
/// verbatim, whatever their encoding.
pub fn format<C: AsRef<[u8]>>(sources: &[Source], contents: &HashMap<String, C>) -> Vec<u8> {
    let mut out = Vec::new();
    let mut first = true;

    for source in sources {
        let Some(content) = contents.get(source.as_str()) else {
            continue;
        };

        if !first {
            out.extend_from_slice(BLOCK_SEPARATOR.as_bytes());
        }
        first = false;

        out.extend_from_slice(delimiter_line(&source.display_name()).as_bytes());
        out.push(b'\n');
        out.extend_from_slice(content.as_ref());
    }

    out
}
