//! Message and identifier types of a Telegram export.
//!
//! This module provides [`Message`], one entry of the export's `messages`
//! array, together with the opaque identifiers [`PeerId`] and [`MessageId`].
//! Messages are immutable once loaded; derived values such as the flattened
//! text are computed on demand.
//!
//! # Examples
//!
//! ## Builder Pattern
//!
//! ```
//! use chatlens::Message;
//!
//! let msg = Message::new(2, "hi @alice")
//!     .with_sender("user2", "Bob")
//!     .with_reply_to(1);
//!
//! assert_eq!(msg.from_id().map(|id| id.as_str()), Some("user2"));
//! assert_eq!(msg.text_content(), "hi @alice");
//! ```
//!
//! ## Deserialization
//!
//! ```
//! use chatlens::Message;
//!
//! let json = r#"{"id": 7, "type": "message", "from": "Alice", "from_id": "user1",
//!               "text": ["see ", {"type": "link", "text": "https://a.co"}]}"#;
//! let msg: Message = serde_json::from_str(json)?;
//!
//! assert_eq!(msg.text_content(), "see https://a.co");
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::text::TextField;

/// Opaque participant identifier, e.g. `"user123456"` or `"channel42"`.
///
/// Numeric ids from older exports are stored as their decimal text, so a
/// mention token can be compared against the id directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PeerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PeerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for PeerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => PeerId(s),
            Raw::Int(n) => PeerId(n.to_string()),
        })
    }
}

/// Opaque message identifier.
///
/// Telegram uses integers, but the type also accepts strings. An integer
/// and a string never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Int(i64),
    Text(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Int(n) => write!(f, "{}", n),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(n: i64) -> Self {
        MessageId::Int(n)
    }
}

impl From<i32> for MessageId {
    fn from(n: i32) -> Self {
        MessageId::Int(i64::from(n))
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId::Text(s.to_string())
    }
}

/// One message from the export.
///
/// Only the fields used by the analytics are modelled; everything else in
/// the export (media, reactions, `text_entities`, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the batch.
    pub id: MessageId,

    /// Telegram message type (`"message"`, `"service"`). Passed through.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Original date string. Opaque, passed through to reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Unix timestamp as a string, e.g. `"1705314600"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_unixtime: Option<String>,

    /// Sender display name. `null` for deleted accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Sender identifier. Absent for most service messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<PeerId>,

    /// Identifier of the message this one replies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<MessageId>,

    /// Message text, plain or rich.
    #[serde(default)]
    pub text: TextField,
}

impl Message {
    /// Creates a message with only an id and text.
    pub fn new(id: impl Into<MessageId>, text: impl Into<TextField>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            date: None,
            date_unixtime: None,
            from: None,
            from_id: None,
            reply_to_message_id: None,
            text: text.into(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets both the sender id and display name.
    #[must_use]
    pub fn with_sender(mut self, id: impl Into<PeerId>, name: impl Into<String>) -> Self {
        self.from_id = Some(id.into());
        self.from = Some(name.into());
        self
    }

    /// Sets the sender id without a display name.
    #[must_use]
    pub fn with_from_id(mut self, id: impl Into<PeerId>) -> Self {
        self.from_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_reply_to(mut self, reply_id: impl Into<MessageId>) -> Self {
        self.reply_to_message_id = Some(reply_id.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets `date_unixtime` from a UTC timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.date_unixtime = Some(ts.timestamp().to_string());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn from_id(&self) -> Option<&PeerId> {
        self.from_id.as_ref()
    }

    pub fn reply_to(&self) -> Option<&MessageId> {
        self.reply_to_message_id.as_ref()
    }

    /// The flattened plain text of this message.
    pub fn text_content(&self) -> String {
        self.text.flatten()
    }

    /// Parses `date_unixtime`, if present and numeric.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.date_unixtime
            .as_deref()
            .and_then(parse_unix_timestamp)
    }
}

/// Parses a Unix timestamp string to DateTime.
///
/// Telegram stores timestamps as strings like "1234567890".
pub fn parse_unix_timestamp(ts_str: &str) -> Option<DateTime<Utc>> {
    ts_str
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
}
