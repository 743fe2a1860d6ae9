//! Telegram Desktop JSON export loader.
//!
//! Telegram exports chats as JSON with the following structure:
//! ```json
//! {
//!   "name": "Chat Name",
//!   "messages": [
//!     {
//!       "id": 12345,
//!       "type": "message",
//!       "date": "2024-01-15T10:30:00",
//!       "date_unixtime": "1705314600",
//!       "from": "Sender Name",
//!       "from_id": "user123",
//!       "text": "Hello" | ["Hello", {"type": "link", "text": "url"}],
//!       "reply_to_message_id": 12344
//!     }
//!   ],
//!   "participants": [{"id": "user123", "role": "creator"}]
//! }
//! ```
//!
//! The source is first read as a [`serde_json::Value`] so that "not JSON at
//! all" and "JSON without a `messages` array" are reported as different
//! errors.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::Message;
use crate::error::{ChatlensError, Result};
use crate::message::PeerId;

const FORMAT: &str = "Telegram JSON";

/// Title used when the export has no `name`.
pub const DEFAULT_TITLE: &str = "Unknown Chat";

/// A roster entry from the export's `participants` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PeerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RosterEntry {
    pub fn new(id: impl Into<PeerId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Some(role.into()),
        }
    }

    /// Returns `true` for the `creator` and `administrator` roles, in any case.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref().is_some_and(|role| {
            let role = role.to_lowercase();
            role == "creator" || role == "administrator"
        })
    }
}

/// A fully loaded, not yet indexed export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatExport {
    pub title: String,
    pub messages: Vec<Message>,
    pub roster: Vec<RosterEntry>,
}

impl ChatExport {
    pub fn new(title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            title: title.into(),
            messages,
            roster: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = roster;
        self
    }
}

/// Loads an export from a file.
pub fn load_path(path: &Path) -> Result<ChatExport> {
    let bytes = fs::read(path)?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ChatlensError::telegram_parse(e, Some(path.to_path_buf())))?;
    from_value(value)
}

/// Loads an export from any reader.
pub fn load_reader<R: Read>(reader: R) -> Result<ChatExport> {
    let value: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            ChatlensError::Io(e.into())
        } else {
            ChatlensError::telegram_parse(e, None)
        }
    })?;
    from_value(value)
}

/// Loads an export from a string.
pub fn load_str(content: &str) -> Result<ChatExport> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ChatlensError::telegram_parse(e, None))?;
    from_value(value)
}

/// Converts already-parsed JSON into a [`ChatExport`].
pub fn from_value(value: Value) -> Result<ChatExport> {
    let Value::Object(mut root) = value else {
        return Err(ChatlensError::invalid_format(
            FORMAT,
            "top-level value is not an object",
        ));
    };

    let raw_messages = match root.remove("messages") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ChatlensError::invalid_format(
                FORMAT,
                "'messages' is not an array",
            ));
        }
        None => return Err(ChatlensError::missing_field("messages")),
    };

    let title = match root.remove("name") {
        Some(Value::String(name)) => name,
        _ => DEFAULT_TITLE.to_string(),
    };

    let messages = raw_messages
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value::<Message>(raw).map_err(|e| {
                ChatlensError::invalid_format(FORMAT, format!("message #{}: {}", i, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let roster = match root.remove("participants") {
        Some(Value::Array(items)) => parse_roster(items),
        _ => Vec::new(),
    };

    debug!(
        title = %title,
        messages = messages.len(),
        roster = roster.len(),
        "loaded Telegram export"
    );

    Ok(ChatExport {
        title,
        messages,
        roster,
    })
}

fn parse_roster(items: Vec<Value>) -> Vec<RosterEntry> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RosterEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping malformed roster entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageId;

    const SIMPLE: &str = r#"{
        "name": "Test Chat",
        "type": "personal_chat",
        "messages": [
            {"id": 1, "type": "message", "from": "Alice", "from_id": "user1", "text": "Hello!"},
            {"id": 2, "type": "message", "from": "Bob", "from_id": "user2", "text": "Hi", "reply_to_message_id": 1},
            {"id": 3, "type": "service", "actor": "Alice", "actor_id": "user1", "action": "pin_message", "text": ""}
        ],
        "participants": [
            {"id": "user1", "role": "Creator"},
            {"id": "user2", "role": "member"},
            {"role": "administrator"}
        ]
    }"#;

    #[test]
    fn test_load_simple() {
        let export = load_str(SIMPLE).unwrap();
        assert_eq!(export.title, "Test Chat");
        assert_eq!(export.messages.len(), 3);
        assert_eq!(export.messages[1].reply_to(), Some(&MessageId::Int(1)));
        assert!(export.messages[2].from_id().is_none());
    }

    #[test]
    fn test_roster_skips_entries_without_id() {
        let export = load_str(SIMPLE).unwrap();
        assert_eq!(export.roster.len(), 2);
        assert!(export.roster[0].is_admin());
        assert!(!export.roster[1].is_admin());
    }

    #[test]
    fn test_default_title() {
        let export = load_str(r#"{"messages": []}"#).unwrap();
        assert_eq!(export.title, DEFAULT_TITLE);
        assert!(export.messages.is_empty());
        assert!(export.roster.is_empty());
    }

    #[test]
    fn test_not_json() {
        let err = load_str("this is not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_messages() {
        let err = load_str(r#"{"name": "x"}"#).unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_wrong_shapes() {
        assert!(load_str("[1, 2]").unwrap_err().is_invalid_format());
        assert!(load_str(r#"{"messages": {}}"#).unwrap_err().is_invalid_format());
        let err = load_str(r#"{"messages": [{"text": "no id"}]}"#).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("message #0"));
    }

    #[test]
    fn test_load_reader() {
        let export = load_reader(SIMPLE.as_bytes()).unwrap();
        assert_eq!(export.messages.len(), 3);
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, SIMPLE.as_bytes()).unwrap();
        let export = load_path(file.path()).unwrap();
        assert_eq!(export.title, "Test Chat");

        let err = load_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error_from_every_source() {
        let bytes: &[u8] = b"{\"name\": \"\xff\xfe\", \"messages\": []}";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, bytes).unwrap();

        let from_file = load_path(file.path()).unwrap_err();
        assert!(from_file.is_parse());
        assert!(from_file.to_string().contains("file:"));

        assert!(load_reader(bytes).unwrap_err().is_parse());
    }

    #[test]
    fn test_admin_role_case_insensitive() {
        assert!(RosterEntry::new("u", "ADMINISTRATOR").is_admin());
        assert!(RosterEntry::new("u", "creator").is_admin());
        assert!(!RosterEntry::new("u", "admin").is_admin());
        let no_role = RosterEntry {
            id: PeerId::from("u"),
            role: None,
        };
        assert!(!no_role.is_admin());
    }
}
