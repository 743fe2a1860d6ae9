//! JSON Lines (JSONL) output writer.
//!
//! One JSON object per line, no enclosing array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::MessageRecord;
use crate::config::OutputConfig;
use crate::core::search::MessageView;
use crate::error::Result;

/// Writes a message listing in JSONL format.
///
/// ```jsonl
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(views: &[MessageView], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for view in views {
        let line = serde_json::to_string(&MessageRecord::from_view(view, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Same as [`write_jsonl`] but returns the document as a string.
pub fn to_jsonl(views: &[MessageView], config: &OutputConfig) -> Result<String> {
    let records: Vec<MessageRecord> = views
        .iter()
        .map(|v| MessageRecord::from_view(v, config))
        .collect();
    records_to_jsonl(&records)
}

/// One line per row.
pub fn records_to_jsonl<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}
