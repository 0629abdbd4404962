//! DND rule models, in the shape the settings store keeps them.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

/// Condition under which a firing rule is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DndException {
    /// Subject, snippet or sender contains this text.
    Keyword {
        /// Text to look for (case-insensitive).
        value: String,
    },
    /// Text contains an urgent keyword.
    Urgent {
        /// Whether the exception is active.
        #[serde(default = "enabled")]
        enabled: bool,
    },
    /// Text mentions a deadline followed by a date.
    Deadline {
        /// Whether the exception is active.
        #[serde(default = "enabled")]
        enabled: bool,
    },
}

impl DndException {
    /// Keyword exception.
    #[must_use]
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword {
            value: value.into(),
        }
    }

    /// Active urgent-keyword exception.
    #[must_use]
    pub const fn urgent() -> Self {
        Self::Urgent { enabled: true }
    }

    /// Active deadline exception.
    #[must_use]
    pub const fn deadline() -> Self {
        Self::Deadline { enabled: true }
    }
}

/// One do-not-disturb rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DndRule {
    /// Disabled rules are skipped.
    pub enabled: bool,
    /// First quiet hour (0-23), inclusive.
    pub time_start: Option<u8>,
    /// End of the quiet window (0-23), exclusive.
    pub time_end: Option<u8>,
    /// Sender fragments that trigger the rule.
    pub senders: Vec<String>,
    /// Exceptions checked when the rule fires.
    pub exceptions: Vec<DndException>,
}

impl Default for DndRule {
    fn default() -> Self {
        Self {
            enabled: true,
            time_start: None,
            time_end: None,
            senders: Vec::new(),
            exceptions: Vec::new(),
        }
    }
}

impl DndRule {
    /// Rule that mutes everything between `start` (inclusive) and `end` (exclusive).
    #[must_use]
    pub fn quiet_hours(start: u8, end: u8) -> Self {
        Self {
            time_start: Some(start),
            time_end: Some(end),
            ..Self::default()
        }
    }

    /// Rule that mutes the given senders at any hour.
    #[must_use]
    pub fn for_senders<I, S>(senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            senders: senders.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds an exception.
    #[must_use]
    pub fn with_exception(mut self, exception: DndException) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// Disables the rule.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether `hour` falls in `[time_start, time_end)`.
    ///
    /// Both bounds must be set; a window with `start >= end` is empty.
    #[must_use]
    pub fn covers_hour(&self, hour: u32) -> bool {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => hour >= u32::from(start) && hour < u32::from(end),
            _ => false,
        }
    }

    /// Whether the lower-cased sender contains any configured fragment.
    #[must_use]
    pub fn matches_sender(&self, from: &str) -> bool {
        self.senders
            .iter()
            .map(|s| s.trim().to_lowercase())
            .any(|s| !s.is_empty() && from.contains(&s))
    }
}
