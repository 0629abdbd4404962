//! Message records handed to the classifier.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One inbox row as extracted by the upstream scraper or mail API.
///
/// Every field is optional on the wire: missing values default to empty
/// strings / `false` / `None`, so the classifier is total over partially
/// populated records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// Identifier that is stable for the same thread across rescans.
    pub id: String,
    /// Sender address (or display text when no address is available).
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Short preview of the body. May span several lines.
    pub snippet: String,
    /// Whether the thread is unread.
    pub unread: bool,
    /// When the message arrived, in local wall-clock time.
    pub received_at: Option<NaiveDateTime>,
}

impl Message {
    /// Creates a new message with the given identity and headers.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            subject: subject.into(),
            snippet: snippet.into(),
            unread: false,
            received_at: None,
        }
    }

    /// Marks the message as unread.
    #[must_use]
    pub fn with_unread(mut self, unread: bool) -> Self {
        self.unread = unread;
        self
    }

    /// Sets the arrival time.
    #[must_use]
    pub fn with_received_at(mut self, at: NaiveDateTime) -> Self {
        self.received_at = Some(at);
        self
    }
}

/// Lower-cased view of a message, computed once per classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageText {
    /// Sender, lower-cased.
    pub from: String,
    /// Subject, lower-cased.
    pub subject: String,
    /// Snippet, lower-cased.
    pub snippet: String,
    /// Part of the sender after the `@`.
    pub domain: String,
    /// Part of the sender before the `@`.
    pub local_part: String,
}

impl MessageText {
    /// Normalizes the text fields of a message.
    #[must_use]
    pub fn new(message: &Message) -> Self {
        let from = message.from.to_lowercase();
        let mut parts = from.split('@');
        let local_part = parts.next().unwrap_or_default().to_string();
        let domain = parts.next().unwrap_or_default().to_string();

        Self {
            subject: message.subject.to_lowercase(),
            snippet: message.snippet.to_lowercase(),
            from,
            domain,
            local_part,
        }
    }

    /// Non-blank snippet lines, in order.
    pub fn snippet_lines(&self) -> impl Iterator<Item = &str> {
        self.snippet.split('\n').filter(|line| !line.trim().is_empty())
    }
}
