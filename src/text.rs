//! Telegram's rich-text field and its flattening into plain text.
//!
//! The `text` field in Telegram exports can be:
//! - A simple string: `"Hello"`
//! - An array of runs mixing strings and objects:
//!   `["Text ", {"type": "link", "text": "https://example.com"}]`
//!
//! [`TextField`] models both shapes explicitly and [`TextField::flatten`]
//! turns either into a single string.
//!
//! # Example
//!
//! ```
//! use chatlens::text::TextField;
//! use serde_json::json;
//!
//! let field = TextField::from_value(json!([
//!     "Check this: ",
//!     {"type": "link", "text": "https://example.com"},
//!     " cool!"
//! ]));
//! assert_eq!(field.flatten(), "Check this: https://example.com cool!");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The `text` field of a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextField {
    /// A plain string.
    Plain(String),
    /// An ordered sequence of text runs.
    Runs(Vec<TextRun>),
}

/// One fragment of a rich-text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextRun {
    /// A bare string run.
    Plain(String),
    /// A run carrying formatting metadata (`bold`, `link`, `mention`, ...).
    Annotated(AnnotatedRun),
    /// Anything else found in the array. Contributes no text.
    Other(Value),
}

/// A run object such as `{"type": "bold", "text": "Important"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRun {
    /// Entity type, e.g. `"link"` or `"mention"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Plain text of the run. Empty when the source had no string `text`.
    pub text: String,

    /// Remaining metadata (`href`, `user_id`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextField {
    /// Builds a text field from an arbitrary JSON value.
    ///
    /// Strings and arrays map to [`Plain`](Self::Plain) and
    /// [`Runs`](Self::Runs); every other value is treated as empty text.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => TextField::Plain(s),
            Value::Array(items) => {
                TextField::Runs(items.into_iter().map(TextRun::from_value).collect())
            }
            _ => TextField::Plain(String::new()),
        }
    }

    /// Concatenates the field into one plain string.
    ///
    /// No separators are inserted between runs.
    pub fn flatten(&self) -> String {
        match self {
            TextField::Plain(s) => s.clone(),
            TextField::Runs(runs) => runs.iter().map(TextRun::contribution).collect(),
        }
    }

    /// Returns `true` if the flattened text would be empty.
    pub fn is_empty(&self) -> bool {
        match self {
            TextField::Plain(s) => s.is_empty(),
            TextField::Runs(runs) => runs.iter().all(|r| r.contribution().is_empty()),
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        TextField::Plain(String::new())
    }
}

impl From<&str> for TextField {
    fn from(s: &str) -> Self {
        TextField::Plain(s.to_string())
    }
}

impl From<String> for TextField {
    fn from(s: String) -> Self {
        TextField::Plain(s)
    }
}

impl From<Vec<TextRun>> for TextField {
    fn from(runs: Vec<TextRun>) -> Self {
        TextField::Runs(runs)
    }
}

impl<'de> Deserialize<'de> for TextField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(TextField::from_value(value))
    }
}

impl TextRun {
    /// Builds a run from one element of a text array.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => TextRun::Plain(s),
            Value::Object(mut obj) => {
                let kind = match obj.remove("type") {
                    Some(Value::String(k)) => Some(k),
                    Some(other) => {
                        obj.insert("type".to_string(), other);
                        None
                    }
                    None => None,
                };
                // A non-string `text` is dropped: the run serializes its own `text`.
                let text = match obj.remove("text") {
                    Some(Value::String(t)) => t,
                    _ => String::new(),
                };
                TextRun::Annotated(AnnotatedRun {
                    kind,
                    text,
                    extra: obj,
                })
            }
            other => TextRun::Other(other),
        }
    }

    /// Creates an annotated run with the given entity type.
    pub fn annotated(kind: impl Into<String>, text: impl Into<String>) -> Self {
        TextRun::Annotated(AnnotatedRun {
            kind: Some(kind.into()),
            text: text.into(),
            extra: Map::new(),
        })
    }

    /// The text this run adds to the flattened message.
    pub fn contribution(&self) -> &str {
        match self {
            TextRun::Plain(s) => s,
            TextRun::Annotated(run) => &run.text,
            TextRun::Other(_) => "",
        }
    }
}

impl From<&str> for TextRun {
    fn from(s: &str) -> Self {
        TextRun::Plain(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_plain_is_identity() {
        let field = TextField::from("Hello world");
        assert_eq!(field.flatten(), "Hello world");
    }

    #[test]
    fn test_flatten_runs_with_link() {
        let field = TextField::from_value(json!([
            "Check this: ",
            {"type": "link", "text": "https://example.com"},
            " cool!"
        ]));
        assert_eq!(field.flatten(), "Check this: https://example.com cool!");
    }

    #[test]
    fn test_flatten_no_separators() {
        let field = TextField::from_value(json!([
            {"type": "bold", "text": "Important:"},
            "this"
        ]));
        assert_eq!(field.flatten(), "Important:this");
    }

    #[test]
    fn test_run_without_text_contributes_nothing() {
        let field = TextField::from_value(json!([
            "a",
            {"type": "custom_emoji"},
            {"type": "bold", "text": 42},
            7,
            null,
            "b"
        ]));
        assert_eq!(field.flatten(), "ab");
    }

    #[test]
    fn test_non_text_values_are_empty() {
        assert_eq!(TextField::from_value(json!(null)).flatten(), "");
        assert_eq!(TextField::from_value(json!(12)).flatten(), "");
        assert_eq!(TextField::from_value(json!({"text": "x"})).flatten(), "");
    }

    #[test]
    fn test_annotated_keeps_metadata() {
        let run = TextRun::from_value(json!({"type": "text_link", "text": "here", "href": "https://x.io"}));
        match run {
            TextRun::Annotated(a) => {
                assert_eq!(a.kind.as_deref(), Some("text_link"));
                assert_eq!(a.text, "here");
                assert_eq!(a.extra.get("href"), Some(&json!("https://x.io")));
            }
            other => panic!("expected annotated run, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_text_serializes_once() {
        let run = TextRun::from_value(json!({"type": "bold", "text": ["nested"], "href": "x"}));
        assert_eq!(run.contribution(), "");

        let out = serde_json::to_string(&run).unwrap();
        assert_eq!(out.matches("\"text\"").count(), 1);
        assert_eq!(
            serde_json::from_str::<Value>(&out).unwrap(),
            json!({"type": "bold", "text": "", "href": "x"})
        );
    }

    #[test]
    fn test_deserialize_field() {
        let field: TextField = serde_json::from_str(r#"["hi ", {"type": "mention", "text": "@bob"}]"#).unwrap();
        assert_eq!(field.flatten(), "hi @bob");

        let field: TextField = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(field, TextField::Plain("plain".into()));
    }

    #[test]
    fn test_is_empty() {
        assert!(TextField::default().is_empty());
        assert!(TextField::from_value(json!([{"type": "bold"}])).is_empty());
        assert!(!TextField::from("x").is_empty());
    }
}
