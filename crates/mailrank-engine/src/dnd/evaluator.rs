//! DND rule evaluation.

use std::sync::LazyLock;

use chrono::Timelike;
use regex::Regex;
use tracing::debug;

use super::model::{DndException, DndRule};
use crate::keywords::URGENT_KEYWORDS;
use crate::priority::contains_any;
use crate::Message;

#[allow(clippy::expect_used)] // literal pattern
static DEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdeadline\b.*?\b(\d{1,2}[/\-]\d{1,2})").expect("valid deadline regex")
});

/// Evaluates DND rules against messages.
///
/// Carries the urgent keyword list used by [`DndException::Urgent`].
#[derive(Debug, Clone)]
pub struct DndEvaluator {
    urgent_keywords: Vec<String>,
}

impl Default for DndEvaluator {
    fn default() -> Self {
        Self::new(URGENT_KEYWORDS.iter().map(ToString::to_string).collect())
    }
}

impl DndEvaluator {
    /// Creates an evaluator with a custom urgent keyword list.
    #[must_use]
    pub fn new(urgent_keywords: Vec<String>) -> Self {
        Self {
            urgent_keywords: urgent_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Whether any rule mutes `message` at time `now`.
    #[must_use]
    pub fn is_muted<T: Timelike>(&self, message: &Message, rules: &[DndRule], now: &T) -> bool {
        self.muting_rule(message, rules, now).is_some()
    }

    /// Index of the first rule that mutes `message`, if any.
    ///
    /// A rule whose exception matches is skipped and evaluation moves on to
    /// the next rule.
    #[must_use]
    pub fn muting_rule<T: Timelike>(
        &self,
        message: &Message,
        rules: &[DndRule],
        now: &T,
    ) -> Option<usize> {
        if rules.is_empty() {
            return None;
        }

        let hour = now.hour();
        let from = message.from.to_lowercase();
        let text = format!("{} {} {}", message.subject, message.snippet, message.from).to_lowercase();

        for (index, rule) in rules.iter().enumerate() {
            if !rule.enabled {
                continue;
            }
            if !rule.covers_hour(hour) && !rule.matches_sender(&from) {
                continue;
            }
            if self.exception_applies(&rule.exceptions, &text) {
                debug!(id = %message.id, rule = index, "DND exception applies");
                continue;
            }
            debug!(id = %message.id, rule = index, "muted");
            return Some(index);
        }

        None
    }

    fn exception_applies(&self, exceptions: &[DndException], text: &str) -> bool {
        exceptions.iter().any(|exception| match exception {
            DndException::Keyword { value } => {
                let value = value.trim().to_lowercase();
                !value.is_empty() && text.contains(&value)
            }
            DndException::Urgent { enabled } => *enabled && contains_any(text, &self.urgent_keywords),
            DndException::Deadline { enabled } => *enabled && DEADLINE.is_match(text),
        })
    }
}

/// Whether any rule mutes `message` at time `now`, using the built-in urgent keywords.
#[must_use]
pub fn is_muted<T: Timelike>(message: &Message, rules: &[DndRule], now: &T) -> bool {
    DndEvaluator::default().is_muted(message, rules, now)
}
