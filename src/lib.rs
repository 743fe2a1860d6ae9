//! # Chatlens
//!
//! A Rust library for analyzing Telegram chat exports.
//!
//! ## Overview
//!
//! Chatlens loads a Telegram Desktop JSON export once and derives views
//! over it:
//! - **Participants** — who wrote, how often, and who administers the chat
//! - **Interaction graph** — who replies to and mentions whom
//! - **Frequent words** — punctuation stripped, stop words dropped, forms
//!   merged by a pluggable [`Normalizer`](normalize::Normalizer)
//! - **Search and history** — case-insensitive substring search and paged listings
//! - **Links** — every URL shared in the chat
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut analyzer = ChatAnalyzer::new();
//!     analyzer.load_path("result.json")?;
//!
//!     for p in analyzer.participants(SortKey::ByMessageCount) {
//!         println!("{}: {}", p.display_name, p.message_count);
//!     }
//!
//!     for edge in analyzer.interaction_graph().map(|g| g.weighted_edges()).unwrap_or_default() {
//!         println!("{} -> {} ({})", edge.from, edge.to, edge.weight);
//!     }
//!
//!     let page = analyzer.history(1);
//!     println!("{} of {} messages", page.entries.len(), page.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] — export loading ([`ChatExport`](parsing::ChatExport))
//! - [`message`] / [`text`] — message model and rich-text flattening
//! - [`core`] — analytics: participants, links, frequency, graph, search,
//!   history, filters and report writers
//! - [`session`] — [`ChatSession`](session::ChatSession) and the
//!   [`ChatAnalyzer`](session::ChatAnalyzer) state holder
//! - [`normalize`] — word normalizers
//! - [`config`] — analysis and output settings
//! - [`format`] — report format selection
//! - [`error`] — [`ChatlensError`] and [`Result`]
//! - [`prelude`] — convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod normalize;
pub mod parsing;
pub mod session;
pub mod text;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Messages
    pub use crate::Message;
    pub use crate::message::{MessageId, PeerId};
    pub use crate::text::{TextField, TextRun};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Loading
    pub use crate::parsing::{ChatExport, RosterEntry};

    // Sessions
    pub use crate::session::{ChatAnalyzer, ChatSession};

    // Settings
    pub use crate::config::{AnalysisConfig, Language, OutputConfig};
    pub use crate::format::OutputFormat;

    // Analytics
    pub use crate::core::{
        FilterConfig, GraphView, HistoryPage, InteractionGraph, InteractionKind, LinkRecord,
        MessageView, Participant, ParticipantRow, SortKey, WeightedEdge, WordCount, apply_filters,
        filter_export,
    };

    // Normalizers
    #[cfg(feature = "stemming")]
    pub use crate::normalize::SnowballNormalizer;
    pub use crate::normalize::{IdentityNormalizer, Normalizer};
}
