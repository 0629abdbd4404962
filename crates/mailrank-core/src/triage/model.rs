//! Processed message records.

use chrono::NaiveDateTime;
use mailrank_engine::{Category, ClassificationResult, Message, Priority};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of processed messages kept in [`History`].
pub const HISTORY_LIMIT: usize = 1000;

/// A message together with everything triage decided about it.
///
/// Serializes flat: message fields, classification fields, `isDnd` and
/// `processedAt` side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMessage {
    /// The message as received.
    #[serde(flatten)]
    pub message: Message,
    /// Category, priority, flags and extracted details.
    #[serde(flatten)]
    pub classification: ClassificationResult,
    /// Whether a DND rule muted the message.
    pub is_dnd: bool,
    /// When triage ran.
    pub processed_at: NaiveDateTime,
}

impl ProcessedMessage {
    /// Final priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.classification.priority
    }

    /// Final category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.classification.category
    }
}

/// Most recent processed messages, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<ProcessedMessage>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, dropping the oldest beyond [`HISTORY_LIMIT`].
    pub fn push(&mut self, entry: ProcessedMessage) {
        self.entries.push(entry);
        self.trim();
    }

    /// Appends several entries in order.
    pub fn extend<I: IntoIterator<Item = ProcessedMessage>>(&mut self, entries: I) {
        self.entries.extend(entries);
        self.trim();
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ProcessedMessage] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim(&mut self) {
        if self.entries.len() > HISTORY_LIMIT {
            let dropped = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..dropped);
            debug!(dropped, kept = HISTORY_LIMIT, "history trimmed");
        }
    }
}

impl FromIterator<ProcessedMessage> for History {
    fn from_iter<I: IntoIterator<Item = ProcessedMessage>>(iter: I) -> Self {
        let mut history = Self::new();
        history.extend(iter);
        history
    }
}
