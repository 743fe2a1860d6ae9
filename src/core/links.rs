//! Link extraction from message text.
//!
//! Recognizes scheme-qualified URLs (`http://`, `https://`) and bare
//! `www.` hosts. After the first label and dot at least two non-whitespace
//! characters must follow; the match then runs up to the next whitespace.
//!
//! # Example
//!
//! ```
//! use chatlens::core::links::find_links;
//!
//! let links = find_links("see https://a.co/x and www.b.org/y");
//! assert_eq!(links, vec!["https://a.co/x", "www.b.org/y"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::participants::ParticipantIndex;
use crate::message::PeerId;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?P<www>www\.)?(?P<host>[a-zA-Z0-9]+)\.\S{2,}|www\.[a-zA-Z0-9]+\.\S{2,}",
    )
    .expect("URL pattern is valid")
});

/// One link found in the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub link: String,
    pub from_id: Option<PeerId>,
    pub from_name: String,
}

/// Finds every link in `text`, left to right.
pub fn find_links(text: &str) -> Vec<&str> {
    let mut links = Vec::new();
    let mut pos = 0;

    while let Some(caps) = URL_PATTERN.captures_at(text, pos) {
        let Some(m) = caps.get(0) else {
            break;
        };
        // A scheme URL must continue with "www." or with a host that
        // doesn't start with "www". Scanning resumes one byte after a
        // rejected candidate, so links inside its span are still found.
        let rejected = caps.name("www").is_none()
            && caps.name("host").is_some_and(|host| host.as_str().starts_with("www"));
        if rejected {
            pos = m.start() + 1;
        } else {
            links.push(m.as_str());
            pos = m.end();
        }
    }
    links
}

/// Extracts links from all messages in batch order.
pub fn extract_links(messages: &[Message], index: &ParticipantIndex) -> Vec<LinkRecord> {
    messages
        .iter()
        .flat_map(|msg| {
            let text = msg.text_content();
            let from_name = index.sender_name(msg.from_id()).to_string();
            find_links(&text)
                .into_iter()
                .map(|link| LinkRecord {
                    link: link.to_string(),
                    from_id: msg.from_id().cloned(),
                    from_name: from_name.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{TextField, TextRun};

    #[test]
    fn test_scheme_and_www() {
        assert_eq!(
            find_links("see https://a.co/x and www.b.org/y"),
            vec!["https://a.co/x", "www.b.org/y"]
        );
    }

    #[test]
    fn test_http_with_www() {
        assert_eq!(
            find_links("go to http://www.example.com/page?q=1 now"),
            vec!["http://www.example.com/page?q=1"]
        );
    }

    #[test]
    fn test_requires_two_chars_after_dot() {
        assert!(find_links("https://a.b").is_empty());
        assert!(find_links("www.a.b").is_empty());
        assert_eq!(find_links("https://a.bc"), vec!["https://a.bc"]);
    }

    #[test]
    fn test_scheme_host_starting_with_www_rejected() {
        assert!(find_links("https://wwwx.com/").is_empty());
        assert!(find_links("https://www.co").is_empty());
    }

    #[test]
    fn test_rejected_candidate_does_not_hide_later_links() {
        assert_eq!(
            find_links("https://wwwsite.com/,https://a.co"),
            vec!["https://a.co"]
        );
        assert_eq!(
            find_links("https://wwwx.io/www.google.com"),
            vec!["www.google.com"]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(find_links("just words, no urls. example.com").is_empty());
        assert!(find_links("").is_empty());
    }

    #[test]
    fn test_extract_links_records() {
        let messages = vec![
            Message::new(1, "one https://a.co/1 two https://b.co/2").with_sender("user1", "Alice"),
            Message::new(
                2,
                TextField::Runs(vec![
                    TextRun::from("read "),
                    TextRun::annotated("link", "www.rust-lang.org"),
                ]),
            ),
            Message::new(3, "nothing here").with_sender("user2", "Bob"),
        ];
        let index = ParticipantIndex::build(&messages);
        let links = extract_links(&messages, &index);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].link, "https://a.co/1");
        assert_eq!(links[0].from_name, "Alice");
        assert_eq!(links[1].link, "https://b.co/2");
        // "www.rust-lang.org": the first label stops at '-', so it must be
        // followed by a dot to match. It isn't.
        assert!(links.iter().all(|l| l.from_id.is_some()));
    }

    #[test]
    fn test_extract_links_without_sender() {
        let messages = vec![Message::new(1, "www.example.org")];
        let links = extract_links(&messages, &ParticipantIndex::default());
        assert_eq!(links.len(), 1);
        assert!(links[0].from_id.is_none());
        assert_eq!(links[0].from_name, "Unknown");
    }
}
