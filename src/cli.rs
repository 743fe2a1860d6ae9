//! Command-line interface definition using clap.
//!
//! - [`Args`] - top-level arguments, shared by every report
//! - [`Command`] - one subcommand per report
//!
//! ```rust
//! use chatlens::cli::{Args, Command};
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatlens", "search", "chat.json", "release", "--format", "json"]);
//! assert!(matches!(args.command, Command::Search { .. }));
//! assert_eq!(args.input().to_str(), Some("chat.json"));
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{AnalysisConfig, Language, OutputConfig};
use crate::core::filter::FilterConfig;
use crate::core::participants::SortKey;
use crate::error::Result;
use crate::format::OutputFormat;

/// Analyze Telegram chat exports: participants, interactions, words,
/// links and searchable history.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens participants result.json --sort messages
    chatlens words result.json --stemmer --top 30
    chatlens graph result.json --weighted -f json -o graph.json
    chatlens search result.json release --after 2024-01-01
    chatlens history result.json --page 2 --page-size 100")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format [default: taken from the -o extension, else csv]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    /// Only analyze messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub after: Option<String>,

    /// Only analyze messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub before: Option<String>,

    /// Only analyze messages from this sender (name or id)
    #[arg(long, value_name = "USER", global = true)]
    pub from: Option<String>,

    /// Chat language, selects stop words and stemmer
    #[arg(short, long, value_enum, default_value = "russian", global = true)]
    pub language: Language,

    /// Include message IDs in message listings
    #[arg(long, global = true)]
    pub ids: bool,

    /// Include dates in message listings
    #[arg(short = 'd', long, global = true)]
    pub dates: bool,

    /// Include reply references in message listings
    #[arg(short = 'r', long, global = true)]
    pub replies: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available reports.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Title, admins and message counts
    Info {
        /// Path to the Telegram JSON export
        input: PathBuf,
    },

    /// List participants with message counts
    #[command(alias = "users")]
    Participants {
        input: PathBuf,

        /// Sort order: name or messages
        #[arg(long, default_value = "name")]
        sort: SortKey,
    },

    /// Messages sent by one participant
    User {
        input: PathBuf,

        /// Participant id, e.g. user123456
        id: String,
    },

    /// Case-insensitive substring search
    Search {
        input: PathBuf,

        keyword: String,
    },

    /// Reply and mention interaction graph
    Graph {
        input: PathBuf,

        /// Fold parallel edges into weighted edges
        #[arg(long)]
        weighted: bool,
    },

    /// One page of the chat history
    History {
        input: PathBuf,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Links shared in the chat
    Links { input: PathBuf },

    /// Most frequent words
    Words {
        input: PathBuf,

        /// Number of words to report
        #[arg(long)]
        top: Option<usize>,

        /// Merge word forms with the Snowball stemmer
        #[arg(long)]
        stemmer: bool,

        /// Extra words to ignore
        #[arg(long = "stop-word", value_name = "WORD")]
        stop_words: Vec<String>,
    },
}

impl Args {
    pub fn input(&self) -> &Path {
        match &self.command {
            Command::Info { input }
            | Command::Participants { input, .. }
            | Command::User { input, .. }
            | Command::Search { input, .. }
            | Command::Graph { input, .. }
            | Command::History { input, .. }
            | Command::Links { input }
            | Command::Words { input, .. } => input,
        }
    }

    /// Filters requested with `--after`, `--before` and `--from`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDate`](crate::ChatlensError::InvalidDate) for a malformed date.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new();
        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_sender(from.clone());
        }
        Ok(config)
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new().with_language(self.language);
        match &self.command {
            Command::Words { top, stop_words, .. } => {
                if let Some(top) = top {
                    config = config.with_top_words(*top);
                }
                for word in stop_words {
                    config = config.with_stop_word(word.to_lowercase());
                }
            }
            Command::History {
                page_size: Some(size),
                ..
            } => config = config.with_page_size(*size),
            _ => {}
        }
        config
    }

    /// The `--format` value, else the format named by the `-o` extension,
    /// else CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(Path::to_str)
                    .and_then(|path| OutputFormat::from_path(path).ok())
            })
            .unwrap_or_default()
    }

    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.ids {
            config = config.with_ids();
        }
        if self.dates {
            config = config.with_dates();
        }
        if self.replies {
            config = config.with_replies();
        }
        config
    }

    /// Returns `true` if `words --stemmer` was requested.
    pub fn wants_stemmer(&self) -> bool {
        matches!(self.command, Command::Words { stemmer: true, .. })
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
