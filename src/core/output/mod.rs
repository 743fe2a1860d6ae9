//! Report writers.
//!
//! Two kinds of reports are written:
//! - Message listings ([`MessageView`] slices: search results, per-user
//!   listings) whose optional columns are controlled by [`OutputConfig`]
//! - Records (participants, links, word counts, edges, history entries),
//!   written with every field of the row type
//!
//! | Format | Messages | Records | Feature |
//! |--------|----------|---------|---------|
//! | CSV (`;`) | [`to_csv`] / [`write_csv`] | [`records_to_csv`] | `csv-output` |
//! | JSON | [`to_json`] / [`write_json`] | [`records_to_json`] | `json-output` |
//! | JSONL | [`to_jsonl`] / [`write_jsonl`] | [`records_to_jsonl`] | `json-output` |
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::config::OutputConfig;
//! use chatlens::core::output::{to_csv, to_jsonl};
//! use chatlens::core::participants::ParticipantIndex;
//! use chatlens::core::search::MessageView;
//! use chatlens::Message;
//!
//! let messages = vec![Message::new(1, "Hello!").with_sender("user1", "Alice")];
//! let index = ParticipantIndex::build(&messages);
//! let views: Vec<MessageView> = messages.iter().map(|m| MessageView::new(m, &index)).collect();
//!
//! let csv = to_csv(&views, &OutputConfig::new().with_ids())?;
//! assert!(csv.starts_with("ID;FromId;Sender;Content"));
//!
//! let jsonl = to_jsonl(&views, &OutputConfig::new())?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{records_to_csv, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{records_to_json, to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{records_to_jsonl, to_jsonl, write_jsonl};

use serde::Serialize;

use crate::config::OutputConfig;
use crate::core::search::MessageView;
use crate::message::{MessageId, PeerId};

/// A message listing row with only the columns enabled in [`OutputConfig`].
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<PeerId>,
    pub sender: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<MessageId>,
}

impl MessageRecord {
    pub fn from_view(view: &MessageView, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then(|| view.id.clone()),
            date: if config.include_dates { view.date.clone() } else { None },
            from_id: if config.include_ids { view.from_id.clone() } else { None },
            sender: view.from_name.clone(),
            content: view.text_content.clone(),
            reply_to: if config.include_replies { view.reply_to.clone() } else { None },
        }
    }
}
