//! Narrow a batch by date range and sender before analysis.
//!
//! [`FilterConfig`] describes the criteria and [`apply_filters`] applies
//! them. Analytics then run over the filtered batch as if it were the
//! whole export.
//!
//! | Filter | Method | Matches |
//! |--------|--------|---------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Sender name or id, any case |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Message;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatlens::Result<()> {
//! let messages = vec![
//!     Message::new(1, "Old")
//!         .with_sender("user1", "Alice")
//!         .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
//!     Message::new(2, "New")
//!         .with_sender("user1", "Alice")
//!         .with_timestamp(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_sender("alice")
//!     .with_date_from("2024-06-01")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text_content(), "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Messages without a parseable `date_unixtime` are **excluded** when date filters are active
//! - Multiple filters are combined with AND logic

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::Message;
use crate::error::ChatlensError;
use crate::parsing::ChatExport;

/// Criteria for narrowing a batch.
///
/// A message must match all active filters to be kept.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<DateTime<Utc>>,

    /// Include only messages on or before this timestamp.
    pub before: Option<DateTime<Utc>>,

    /// Include only messages whose sender name or id equals this, ignoring case.
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let day = parse_day(date_str)?;
        self.after = Some(day.and_time(NaiveTime::MIN).and_utc());
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let day = parse_day(date_str)?;
        // End of the day to include the full day
        let end = day
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatlensError::invalid_date(date_str))?;
        self.before = Some(end.and_utc());
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// ```
    /// use chatlens::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_sender("Alice");
    /// assert!(config.has_sender_filter());
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter()
    }

    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    pub fn has_sender_filter(&self) -> bool {
        self.from.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref from) = self.from {
            let by_name = msg.from.as_deref().is_some_and(|n| n.to_lowercase() == from.to_lowercase());
            let by_id = msg.from_id().is_some_and(|id| id.as_str().eq_ignore_ascii_case(from));
            if !by_name && !by_id {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(ts) = msg.timestamp() else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Keeps the messages that match all active filters, in their original order.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }
    messages.into_iter().filter(|msg| config.matches(msg)).collect()
}

/// Applies the filters to an export's messages, keeping its title and roster.
pub fn filter_export(export: ChatExport, config: &FilterConfig) -> ChatExport {
    ChatExport {
        messages: apply_filters(export.messages, config),
        ..export
    }
}
