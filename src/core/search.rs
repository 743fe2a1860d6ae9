//! Keyword search and per-user message listing.
//!
//! Both return [`MessageView`]s: the message's metadata with its text
//! flattened and the sender name resolved.
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chatlens::core::participants::ParticipantIndex;
//! use chatlens::core::search::search;
//!
//! let messages = vec![
//!     Message::new(1, "Release is on Friday").with_sender("user1", "Alice"),
//!     Message::new(2, "ok").with_sender("user2", "Bob"),
//! ];
//! let index = ParticipantIndex::build(&messages);
//!
//! let found = search(&messages, &index, "FRIDAY");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].from_name, "Alice");
//! ```

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::participants::ParticipantIndex;
use crate::message::{MessageId, PeerId};

/// A message prepared for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: MessageId,
    pub date: Option<String>,
    pub from_id: Option<PeerId>,
    pub from_name: String,
    pub reply_to: Option<MessageId>,
    pub text_content: String,
}

impl MessageView {
    /// Builds a view with an already flattened text.
    pub fn with_text(msg: &Message, index: &ParticipantIndex, text_content: String) -> Self {
        Self {
            id: msg.id.clone(),
            date: msg.date.clone(),
            from_id: msg.from_id().cloned(),
            from_name: index.sender_name(msg.from_id()).to_string(),
            reply_to: msg.reply_to().cloned(),
            text_content,
        }
    }

    pub fn new(msg: &Message, index: &ParticipantIndex) -> Self {
        Self::with_text(msg, index, msg.text_content())
    }
}

/// Messages whose text contains `keyword`, ignoring case.
///
/// An empty keyword matches nothing.
pub fn search(messages: &[Message], index: &ParticipantIndex, keyword: &str) -> Vec<MessageView> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let needle = keyword.to_lowercase();

    messages
        .iter()
        .filter_map(|msg| {
            let text = msg.text_content();
            text.to_lowercase()
                .contains(&needle)
                .then(|| MessageView::with_text(msg, index, text))
        })
        .collect()
}

/// All messages sent by `id`, in batch order.
pub fn messages_by_user(messages: &[Message], index: &ParticipantIndex, id: &PeerId) -> Vec<MessageView> {
    messages
        .iter()
        .filter(|msg| msg.from_id() == Some(id))
        .map(|msg| MessageView::new(msg, index))
        .collect()
}
