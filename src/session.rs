//! Loaded chat sessions and the two-phase analyzer.
//!
//! A [`ChatSession`] is built once from a [`ChatExport`] and never changes:
//! it owns the message store, the participant index, the admin list and
//! the interaction graph. Every query is a read over that state.
//!
//! [`ChatAnalyzer`] wraps an optional session. Before the first successful
//! load every query returns an empty result; a successful load replaces the
//! session wholesale and a failed one leaves it as it was.
//!
//! # Example
//!
//! ```
//! use chatlens::session::ChatAnalyzer;
//! use chatlens::core::participants::SortKey;
//!
//! # fn main() -> chatlens::Result<()> {
//! let mut analyzer = ChatAnalyzer::new();
//! assert!(analyzer.search("hello").is_empty());
//!
//! analyzer.load_str(r#"{
//!     "name": "Team",
//!     "messages": [
//!         {"id": 1, "from": "Alice", "from_id": "user1", "text": "hello"},
//!         {"id": 2, "from": "Bob", "from_id": "user2", "text": "hi @Alice", "reply_to_message_id": 1}
//!     ]
//! }"#)?;
//!
//! assert_eq!(analyzer.title(), Some("Team"));
//! assert_eq!(analyzer.participants(SortKey::ByName).len(), 2);
//! assert_eq!(analyzer.graph().edges.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::core::frequency::{WordCount, word_frequencies};
use crate::core::graph::{GraphView, InteractionGraph};
use crate::core::history::{HistoryPage, history_page};
use crate::core::links::{LinkRecord, extract_links};
use crate::core::participants::{
    Participant, ParticipantIndex, ParticipantRow, SortKey, extract_admins, mark_admins,
};
use crate::core::search::{self, MessageView};
use crate::core::store::MessageStore;
use crate::error::Result;
use crate::message::{Message, PeerId};
use crate::normalize::{IdentityNormalizer, Normalizer};
use crate::parsing::{self, ChatExport};

// ============================================================================
// ChatSession
// ============================================================================

/// Headline numbers of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub title: String,
    pub messages: usize,
    pub participants: usize,
    /// Admin ids joined with `,`.
    pub admins: String,
    pub interactions: usize,
}

/// One loaded chat with its indexes.
#[derive(Debug, Clone)]
pub struct ChatSession {
    title: String,
    store: MessageStore,
    participants: ParticipantIndex,
    admins: Vec<PeerId>,
    graph: InteractionGraph,
}

impl ChatSession {
    /// Indexes an export.
    pub fn new(export: ChatExport) -> Self {
        let ChatExport {
            title,
            messages,
            roster,
        } = export;

        let store = MessageStore::new(messages);
        let participants = ParticipantIndex::build(store.messages());
        let admins = extract_admins(&roster);
        let graph = InteractionGraph::build(&store, &participants);

        debug!(
            title = %title,
            messages = store.len(),
            participants = participants.len(),
            admins = admins.len(),
            "indexed chat session"
        );

        Self {
            title,
            store,
            participants,
            admins,
            graph,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            title: self.title.clone(),
            messages: self.store.len(),
            participants: self.participants.len(),
            admins: self
                .admins
                .iter()
                .map(PeerId::as_str)
                .collect::<Vec<_>>()
                .join(","),
            interactions: self.graph.edge_count(),
        }
    }

    pub fn admins(&self) -> &[PeerId] {
        &self.admins
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn participant_index(&self) -> &ParticipantIndex {
        &self.participants
    }

    pub fn participants(&self, key: SortKey) -> Vec<Participant> {
        self.participants.sorted(key)
    }

    /// Participants ordered by `key`, each flagged when it is an administrator.
    pub fn participant_rows(&self, key: SortKey) -> Vec<ParticipantRow> {
        mark_admins(self.participants(key), &self.admins)
    }

    pub fn messages_by_user(&self, id: &PeerId) -> Vec<MessageView> {
        search::messages_by_user(self.messages(), &self.participants, id)
    }

    pub fn search(&self, keyword: &str) -> Vec<MessageView> {
        search::search(self.messages(), &self.participants, keyword)
    }

    /// The multigraph with both its multi-edge and weighted views.
    pub fn interaction_graph(&self) -> &InteractionGraph {
        &self.graph
    }

    /// Labeled nodes plus the multi-edge list.
    pub fn graph(&self) -> GraphView {
        self.graph.view(&self.participants)
    }

    pub fn history_page(&self, page: usize, page_size: usize) -> HistoryPage {
        history_page(self.messages(), &self.participants, page, page_size)
    }

    pub fn links(&self) -> Vec<LinkRecord> {
        extract_links(self.messages(), &self.participants)
    }

    pub fn frequent_words(
        &self,
        stop_words: &HashSet<String>,
        normalizer: &dyn Normalizer,
        k: usize,
    ) -> Vec<WordCount> {
        word_frequencies(self.messages(), stop_words, normalizer, k)
    }
}

impl From<ChatExport> for ChatSession {
    fn from(export: ChatExport) -> Self {
        Self::new(export)
    }
}

// ============================================================================
// ChatAnalyzer
// ============================================================================

/// Holds at most one loaded session plus the analysis settings.
pub struct ChatAnalyzer {
    session: Option<ChatSession>,
    config: AnalysisConfig,
    stop_words: HashSet<String>,
    normalizer: Box<dyn Normalizer>,
}

impl std::fmt::Debug for ChatAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAnalyzer")
            .field("loaded", &self.is_loaded())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ChatAnalyzer {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default())
    }
}

impl ChatAnalyzer {
    /// An uninitialized analyzer with default settings and no normalization.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            session: None,
            stop_words: config.stop_words(),
            config,
            normalizer: Box::new(IdentityNormalizer),
        }
    }

    /// Replaces the word normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads an export file.
    ///
    /// # Errors
    ///
    /// Any load error; the current session is kept.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<&ChatSession> {
        let export = parsing::load_path(path.as_ref())?;
        Ok(self.load_export(export))
    }

    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<&ChatSession> {
        let export = parsing::load_reader(reader)?;
        Ok(self.load_export(export))
    }

    pub fn load_str(&mut self, content: &str) -> Result<&ChatSession> {
        let export = parsing::load_str(content)?;
        Ok(self.load_export(export))
    }

    /// Replaces the session with one built from `export`.
    pub fn load_export(&mut self, export: ChatExport) -> &ChatSession {
        self.session.insert(ChatSession::new(export))
    }

    /// Drops the session, returning to the uninitialized state.
    pub fn unload(&mut self) -> Option<ChatSession> {
        self.session.take()
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn title(&self) -> Option<&str> {
        self.session.as_ref().map(ChatSession::title)
    }

    pub fn admins(&self) -> &[PeerId] {
        self.session.as_ref().map(ChatSession::admins).unwrap_or(&[])
    }

    pub fn participants(&self, key: SortKey) -> Vec<Participant> {
        self.query(|s| s.participants(key))
    }

    pub fn participant_rows(&self, key: SortKey) -> Vec<ParticipantRow> {
        self.query(|s| s.participant_rows(key))
    }

    pub fn messages_by_user(&self, id: &PeerId) -> Vec<MessageView> {
        self.query(|s| s.messages_by_user(id))
    }

    pub fn search(&self, keyword: &str) -> Vec<MessageView> {
        self.query(|s| s.search(keyword))
    }

    pub fn graph(&self) -> GraphView {
        self.query(ChatSession::graph)
    }

    pub fn interaction_graph(&self) -> Option<&InteractionGraph> {
        self.session.as_ref().map(ChatSession::interaction_graph)
    }

    pub fn history_page(&self, page: usize, page_size: usize) -> HistoryPage {
        self.session
            .as_ref()
            .map(|s| s.history_page(page, page_size))
            .unwrap_or(HistoryPage {
                page,
                page_size,
                ..HistoryPage::default()
            })
    }

    /// A history page with the configured page size.
    pub fn history(&self, page: usize) -> HistoryPage {
        self.history_page(page, self.config.page_size)
    }

    pub fn links(&self) -> Vec<LinkRecord> {
        self.query(ChatSession::links)
    }

    /// The configured number of most frequent normalized words.
    pub fn frequent_words(&self) -> Vec<WordCount> {
        self.query(|s| s.frequent_words(&self.stop_words, self.normalizer.as_ref(), self.config.top_words))
    }

    fn query<T: Default>(&self, f: impl FnOnce(&ChatSession) -> T) -> T {
        self.session.as_ref().map(f).unwrap_or_default()
    }
}
