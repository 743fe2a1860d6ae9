//! Chat analytics over a loaded batch.
//!
//! - [`store`] - messages with an id index
//! - [`participants`] - participant index, admins, mention resolution
//! - [`links`] - URL extraction
//! - [`frequency`] - word frequency with pluggable normalization
//! - [`graph`] - reply and mention interaction graph
//! - [`search`] - keyword search and per-user listings
//! - [`history`] - paginated history
//! - [`filter`] - date and sender filters
//! - [`output`] - CSV, JSON and JSONL writers
//!
//! Every function here is pure over its inputs; [`ChatSession`](crate::session::ChatSession)
//! wires them together.

pub mod filter;
pub mod frequency;
pub mod graph;
pub mod history;
pub mod links;
pub mod output;
pub mod participants;
pub mod search;
pub mod store;

pub use filter::{FilterConfig, apply_filters, filter_export};
pub use frequency::{FrequencyTable, WordCount, word_frequencies};
pub use graph::{GraphView, InteractionGraph, InteractionKind, WeightedEdge};
pub use history::{HistoryEntry, HistoryPage, HistoryReport, history_page};
pub use links::{LinkRecord, extract_links};
pub use participants::{Participant, ParticipantIndex, ParticipantRow, SortKey, extract_admins, mark_admins};
pub use search::{MessageView, messages_by_user, search};
pub use store::MessageStore;

pub use crate::Message;
