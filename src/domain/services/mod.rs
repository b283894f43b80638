//! Domain Services
//!
//! Pure logic operating on domain entities. No I/O.

pub mod differ;
pub mod formatter;

pub use differ::{diff, events_from_changes};
pub use formatter::format;
