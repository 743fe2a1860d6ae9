//! The loaded message batch, indexed for reply lookup.

use std::collections::HashMap;

use crate::Message;
use crate::message::MessageId;

/// Messages of one batch in export order, plus an id → position index.
///
/// When an id occurs more than once the first message wins, which matches a
/// front-to-back scan of the batch.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    by_id: HashMap<MessageId, usize>,
}

impl MessageStore {
    pub fn new(messages: Vec<Message>) -> Self {
        let mut by_id = HashMap::with_capacity(messages.len());
        for (pos, msg) in messages.iter().enumerate() {
            by_id.entry(msg.id.clone()).or_insert(pos);
        }
        Self { messages, by_id }
    }

    /// Looks up the first message with the given id.
    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.by_id.get(id).map(|&pos| &self.messages[pos])
    }

    /// Resolves the message a reply points to.
    pub fn reply_target(&self, msg: &Message) -> Option<&Message> {
        msg.reply_to().and_then(|id| self.get(id))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}
