//! Output format selection.
//!
//! [`OutputFormat`] names a report format independently of any CLI
//! framework; with the `cli` feature it also derives [`clap::ValueEnum`].
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::frequency::WordCount;
//! use chatlens::format::{OutputFormat, render_records};
//!
//! let rows = vec![WordCount { word: "rust".into(), count: 3 }];
//! assert_eq!(render_records(&rows, OutputFormat::Csv)?, "word;count\nrust;3\n");
//!
//! let format = OutputFormat::from_path("words.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::core::search::MessageView;
use crate::error::ChatlensError;

/// Report format.
///
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
/// - [`Json`](OutputFormat::Json) - pretty-printed JSON document
/// - [`Jsonl`](OutputFormat::Jsonl) - one JSON object per line
///
/// ```rust
/// use chatlens::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON document
    Json,

    /// JSON Lines, also known as NDJSON
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects the format from a file extension.
    pub fn from_path(path: &str) -> Result<Self, ChatlensError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatlensError::invalid_format(
                "output",
                format!("Unknown file extension: '.{}'. Expected one of: csv, json, jsonl", ext),
            )),
        }
    }

    #[allow(dead_code)]
    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> ChatlensError {
    ChatlensError::invalid_format(
        "output",
        format!(
            "Output format {} requires the '{}' feature to be enabled",
            format,
            format.required_feature()
        ),
    )
}

/// Renders a message listing.
///
/// # Errors
///
/// Fails if the format's feature is disabled or serialization fails.
#[allow(unused_variables)]
pub fn render_messages(
    views: &[MessageView],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(views, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(views, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(views, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders flat report rows with every field of `T`.
#[allow(unused_variables)]
pub fn render_records<T: Serialize>(rows: &[T], format: OutputFormat) -> Result<String, ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::records_to_csv(rows),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::records_to_json(rows),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::records_to_jsonl(rows),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders a single nested document such as a [`GraphView`](crate::core::graph::GraphView).
///
/// JSON is pretty-printed, JSONL is one line. CSV has no nested form and is
/// rejected.
#[allow(unused_variables)]
pub fn render_document<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, ChatlensError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::records_to_json(value),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::records_to_jsonl(std::slice::from_ref(value)),
        OutputFormat::Csv => Err(ChatlensError::invalid_format(
            "output",
            "CSV cannot represent a nested document; use json or jsonl",
        )),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}
