//! Paginated chat history.
//!
//! Pages are numbered from 1; page `n` covers messages
//! `[(n - 1) * page_size, n * page_size)`.

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::participants::ParticipantIndex;
use crate::message::PeerId;

/// One line of the history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: Option<String>,
    pub from_id: Option<PeerId>,
    pub from_name: String,
    pub text_content: String,
}

/// A slice of the history plus the numbers needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl HistoryPage {
    /// Number of pages needed for `total` messages.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// The page with its derived pagination numbers, for serialization.
    pub fn report(&self) -> HistoryReport<'_> {
        HistoryReport {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            has_prev: self.has_prev(),
            entries: &self.entries,
        }
    }
}

/// Serialized form of a [`HistoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryReport<'a> {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub entries: &'a [HistoryEntry],
}

/// Returns page `page` of the history.
///
/// Page 0, a zero page size and pages past the end are empty; `total` is
/// always the size of the whole batch.
pub fn history_page(
    messages: &[Message],
    index: &ParticipantIndex,
    page: usize,
    page_size: usize,
) -> HistoryPage {
    let total = messages.len();
    let entries = if page == 0 || page_size == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(page_size).min(total);
        let end = start.saturating_add(page_size).min(total);
        messages[start..end]
            .iter()
            .map(|msg| HistoryEntry {
                date: msg.date.clone(),
                from_id: msg.from_id().cloned(),
                from_name: index.sender_name(msg.from_id()).to_string(),
                text_content: msg.text_content(),
            })
            .collect()
    };

    HistoryPage {
        entries,
        page,
        page_size,
        total,
    }
}
