//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::OutputConfig;
use crate::core::search::MessageView;
use crate::error::Result;

fn builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(b';');
    builder
}

/// Writes a message listing to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on [`OutputConfig`]
///   - Basic: `Sender`, `Content`
///   - With IDs: `ID`, `FromId`, `Sender`, `Content`
///   - With dates: `Date`, `Sender`, `Content`
///   - With replies: `Sender`, `Content`, `ReplyTo`
/// - Encoding: UTF-8
pub fn write_csv(views: &[MessageView], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let csv = to_csv(views, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

/// Same as [`write_csv`] but returns the document as a string.
pub fn to_csv(views: &[MessageView], config: &OutputConfig) -> Result<String> {
    let mut writer = builder().from_writer(Vec::new());

    writer.write_record(build_header(config))?;
    for view in views {
        writer.write_record(build_record(view, config))?;
    }

    finish(writer)
}

/// Serializes arbitrary flat rows, using the field names as the header.
///
/// An empty slice yields an empty string.
pub fn records_to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = builder().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_dates {
        header.push("Date");
    }
    if config.include_ids {
        header.push("FromId");
    }

    header.push("Sender");
    header.push("Content");

    if config.include_replies {
        header.push("ReplyTo");
    }

    header
}

fn build_record(view: &MessageView, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(view.id.to_string());
    }
    if config.include_dates {
        record.push(view.date.clone().unwrap_or_default());
    }
    if config.include_ids {
        record.push(view.from_id.as_ref().map(ToString::to_string).unwrap_or_default());
    }

    record.push(view.from_name.clone());
    record.push(view.text_content.clone());

    if config.include_replies {
        record.push(view.reply_to.as_ref().map(ToString::to_string).unwrap_or_default());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frequency::WordCount;
    use crate::message::MessageId;
    use tempfile::NamedTempFile;

    fn view(id: i64, name: &str, text: &str) -> MessageView {
        MessageView {
            id: MessageId::Int(id),
            date: Some("2024-06-15T12:30:00".into()),
            from_id: Some(format!("user{}", id).into()),
            from_name: name.into(),
            reply_to: None,
            text_content: text.into(),
        }
    }

    #[test]
    fn test_write_csv_basic() {
        let views = vec![view(1, "Alice", "Hello"), view(2, "Bob", "Hi there")];

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&views, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("Sender;Content\n"));
        assert!(content.contains("Alice;Hello"));
        assert!(content.contains("Bob;Hi there"));
    }

    #[test]
    fn test_to_csv_all_columns() {
        let mut reply = view(2, "Bob", "yes");
        reply.reply_to = Some(MessageId::Int(1));

        let csv = to_csv(&[reply], &OutputConfig::all()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID;Date;FromId;Sender;Content;ReplyTo"));
        assert_eq!(lines.next(), Some("2;2024-06-15T12:30:00;user2;Bob;yes;1"));
    }

    #[test]
    fn test_csv_quotes_delimiter_in_content() {
        let csv = to_csv(&[view(1, "Alice", "a;b")], &OutputConfig::new()).unwrap();
        assert!(csv.contains("Alice;\"a;b\""));
    }

    #[test]
    fn test_records_to_csv() {
        let rows = vec![
            WordCount { word: "привет".into(), count: 3 },
            WordCount { word: "мир".into(), count: 1 },
        ];
        let csv = records_to_csv(&rows).unwrap();
        assert_eq!(csv, "word;count\nпривет;3\nмир;1\n");
        assert_eq!(records_to_csv::<WordCount>(&[]).unwrap(), "");
    }
}
