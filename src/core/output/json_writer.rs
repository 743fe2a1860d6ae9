//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::MessageRecord;
use crate::config::OutputConfig;
use crate::core::search::MessageView;
use crate::error::Result;

/// Writes a message listing to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(views: &[MessageView], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let json = to_json(views, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same as [`write_json`] but returns the document as a string.
pub fn to_json(views: &[MessageView], config: &OutputConfig) -> Result<String> {
    let records: Vec<MessageRecord> = views
        .iter()
        .map(|v| MessageRecord::from_view(v, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Pretty-prints any serializable report.
pub fn records_to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{GraphView, NodeView};
    use crate::message::MessageId;
    use tempfile::NamedTempFile;

    fn view(name: &str, text: &str) -> MessageView {
        MessageView {
            id: MessageId::Int(42),
            date: Some("2024-06-15T12:30:00".into()),
            from_id: Some("user1".into()),
            from_name: name.into(),
            reply_to: Some(MessageId::Int(41)),
            text_content: text.into(),
        }
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&[view("Alice", "Hello")], &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""sender": "Alice""#));
        assert!(json.contains(r#""content": "Hello""#));
        assert!(!json.contains("date"));
        assert!(!json.contains("reply_to"));
    }

    #[test]
    fn test_write_json_with_metadata() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&[view("Alice", "Hello")], temp_file.path(), &OutputConfig::all()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["id"], 42);
        assert_eq!(parsed[0]["date"], "2024-06-15T12:30:00");
        assert_eq!(parsed[0]["from_id"], "user1");
        assert_eq!(parsed[0]["reply_to"], 41);
    }

    #[test]
    fn test_records_to_json_graph() {
        let graph = GraphView {
            nodes: vec![NodeView { id: "user1".into(), label: "Alice".into() }],
            edges: Vec::new(),
        };
        let json = records_to_json(&graph).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["nodes"][0]["label"], "Alice");
        assert!(parsed["edges"].as_array().unwrap().is_empty());
    }
}
