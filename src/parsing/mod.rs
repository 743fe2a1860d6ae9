//! Export loading.
//!
//! Turns raw export data into a [`ChatExport`] ready for indexing.

pub mod telegram;

pub use telegram::{ChatExport, RosterEntry, load_path, load_reader, load_str};
