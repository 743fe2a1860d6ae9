//! Participant index: who wrote how many messages.
//!
//! [`ParticipantIndex::build`] folds over the batch once. Participants are
//! kept in first-appearance order, which is also the order used to break
//! ties when a mention token matches more than one participant.
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chatlens::core::participants::{ParticipantIndex, SortKey};
//!
//! let messages = vec![
//!     Message::new(1, "hello").with_sender("user1", "Alice"),
//!     Message::new(2, "hi").with_sender("user2", "Bob"),
//!     Message::new(3, "how are you").with_sender("user1", "Alice"),
//! ];
//! let index = ParticipantIndex::build(&messages);
//!
//! let ranked = index.sorted(SortKey::ByMessageCount);
//! assert_eq!(ranked[0].display_name, "Alice");
//! assert_eq!(ranked[0].message_count, 2);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::message::PeerId;
use crate::parsing::RosterEntry;

/// Display name used when a sender has no name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One chat participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PeerId,
    pub display_name: String,
    pub message_count: usize,
}

/// Ordering for participant listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending by display name.
    #[default]
    ByName,
    /// Descending by message count.
    ByMessageCount,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "by_name" => Ok(SortKey::ByName),
            "messages" | "count" | "by_message_count" => Ok(SortKey::ByMessageCount),
            _ => Err(format!(
                "Unknown sort key: '{}'. Expected one of: name, messages",
                s
            )),
        }
    }
}

/// Participants of a batch with id and name lookups.
#[derive(Debug, Clone, Default)]
pub struct ParticipantIndex {
    participants: Vec<Participant>,
    by_id: HashMap<PeerId, usize>,
    by_name: HashMap<String, usize>,
}

impl ParticipantIndex {
    /// Builds the index from every message that has a `from_id`.
    pub fn build(messages: &[Message]) -> Self {
        let mut participants: Vec<Participant> = Vec::new();
        let mut by_id: HashMap<PeerId, usize> = HashMap::new();

        for msg in messages {
            let Some(id) = msg.from_id() else {
                continue;
            };
            let pos = match by_id.entry(id.clone()) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    participants.push(Participant {
                        id: id.clone(),
                        display_name: display_name(msg.from.as_deref()),
                        message_count: 0,
                    });
                    *e.insert(participants.len() - 1)
                }
            };
            participants[pos].message_count += 1;
        }

        let mut by_name = HashMap::with_capacity(participants.len());
        for (pos, p) in participants.iter().enumerate() {
            by_name.entry(p.display_name.clone()).or_insert(pos);
        }

        Self {
            participants,
            by_id,
            by_name,
        }
    }

    pub fn get(&self, id: &PeerId) -> Option<&Participant> {
        self.by_id.get(id).map(|&pos| &self.participants[pos])
    }

    /// Name of a participant, or `"Unknown"`.
    pub fn name_of(&self, id: &PeerId) -> &str {
        self.get(id)
            .map(|p| p.display_name.as_str())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Name of the sender of an optional id, or `"Unknown"`.
    pub fn sender_name(&self, id: Option<&PeerId>) -> &str {
        id.map(|id| self.name_of(id)).unwrap_or(UNKNOWN_NAME)
    }

    /// Resolves a mention token to a participant id.
    ///
    /// A participant matches when its display name or its id equals the
    /// token. If several match, the one that first appeared in the batch wins.
    pub fn resolve_mention(&self, token: &str) -> Option<&PeerId> {
        let by_name = self.by_name.get(token).copied();
        let by_id = self.by_id.get(token).copied();
        let pos = match (by_name, by_id) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        Some(&self.participants[pos].id)
    }

    /// Participants ordered by `key`. Ties keep first-appearance order.
    pub fn sorted(&self, key: SortKey) -> Vec<Participant> {
        let mut list = self.participants.clone();
        match key {
            SortKey::ByName => list.sort_by(|a, b| a.display_name.cmp(&b.display_name)),
            SortKey::ByMessageCount => list.sort_by(|a, b| b.message_count.cmp(&a.message_count)),
        }
        list
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, id: &PeerId) -> bool {
        self.by_id.contains_key(id)
    }
}

/// Ids of roster entries holding the `creator` or `administrator` role.
pub fn extract_admins(roster: &[RosterEntry]) -> Vec<PeerId> {
    roster
        .iter()
        .filter(|entry| entry.is_admin())
        .map(|entry| entry.id.clone())
        .collect()
}

/// A participant listing row with the administrator flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub id: PeerId,
    pub display_name: String,
    pub message_count: usize,
    pub is_admin: bool,
}

/// Joins a participant listing with the administrator ids.
pub fn mark_admins(participants: Vec<Participant>, admins: &[PeerId]) -> Vec<ParticipantRow> {
    participants
        .into_iter()
        .map(|p| ParticipantRow {
            is_admin: admins.contains(&p.id),
            id: p.id,
            display_name: p.display_name,
            message_count: p.message_count,
        })
        .collect()
}

fn display_name(from: Option<&str>) -> String {
    match from {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_NAME.to_string(),
    }
}
