//! Progressive classification: read as little text as needed.
//!
//! Most messages resolve from sender and subject alone. Only when that is
//! not conclusive does the classifier widen its window into the snippet,
//! one line at a time, and finally the whole snippet.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect;
use crate::dnd::{DndEvaluator, DndRule};
use crate::extract::{self, InfoBundle};
use crate::priority::{self, Priority, PrioritySignals};
use crate::scorer::{ScoreOutcome, Scorer};
use crate::{Category, ClassifierConfig, Message, MessageText};

/// Confidence reported for automated senders.
pub const NON_HUMAN_CONFIDENCE: u32 = 20;
/// Confidence reported for verification-code mail.
pub const AUTH_CODE_CONFIDENCE: u32 = 15;
/// Confidence reported for newsletters filed as promo.
pub const NEWSLETTER_CONFIDENCE: u32 = 10;

/// Outcome of classifying one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Assigned category.
    pub category: Category,
    /// Reply urgency.
    pub priority: Priority,
    /// Sender or subject looks like bulk mail.
    pub is_newsletter: bool,
    /// Sender is an automated system.
    pub is_non_human: bool,
    /// Winning score, or a fixed value when a fast path decided.
    pub confidence: u32,
    /// Links, dates, amounts and tasks found in the preview.
    pub extracted_info: InfoBundle,
}

/// How much of the snippet one scoring pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWindow {
    /// Sender and subject only.
    SenderAndSubject,
    /// The first `n` non-blank snippet lines.
    Lines(usize),
    /// The whole snippet.
    FullSnippet,
}

impl TextWindow {
    /// Windows in the order they are tried.
    pub const PROGRESSION: [Self; 5] = [
        Self::SenderAndSubject,
        Self::Lines(1),
        Self::Lines(2),
        Self::Lines(3),
        Self::FullSnippet,
    ];

    /// Body text this window exposes, or `None` if the snippet is too short for it.
    fn body(self, text: &MessageText, lines: &[&str]) -> Option<String> {
        match self {
            Self::SenderAndSubject => Some(String::new()),
            Self::Lines(n) => (n > 0 && lines.len() >= n).then(|| lines[..n].join(" ")),
            Self::FullSnippet => (!text.snippet.is_empty()).then(|| text.snippet.clone()),
        }
    }
}

/// Rule-based message classifier.
///
/// Holds an immutable configuration; `classify` is a pure function of its
/// input, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Creates a classifier from a validated configuration.
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies one message.
    ///
    /// Fast paths run first and return immediately: automated senders,
    /// verification codes, then newsletters whose subject is not a bill or
    /// receipt. Everything else is scored progressively and its priority
    /// resolved from the scoring outcome and subject keywords.
    #[must_use]
    pub fn classify(&self, message: &Message) -> ClassificationResult {
        let text = MessageText::new(message);
        let extracted_info = extract::extract(&message.subject, &message.snippet);

        if detect::is_non_human(&text.from, &text.subject) {
            debug!(id = %message.id, "automated sender");
            return ClassificationResult {
                category: Category::Other,
                priority: Priority::LOWEST,
                is_newsletter: false,
                is_non_human: true,
                confidence: NON_HUMAN_CONFIDENCE,
                extracted_info,
            };
        }

        let is_non_human = detect::is_non_human_deep(&text);

        if detect::is_auth_code(&text.subject) {
            debug!(id = %message.id, "verification code");
            return ClassificationResult {
                category: Category::AuthCodes,
                priority: Priority::LOWEST,
                is_newsletter: false,
                is_non_human,
                confidence: AUTH_CODE_CONFIDENCE,
                extracted_info,
            };
        }

        let is_newsletter = detect::is_newsletter(&text.from, &text.subject);
        if is_newsletter && !detect::is_transactional_subject(&text.subject) {
            debug!(id = %message.id, "newsletter");
            return ClassificationResult {
                category: Category::Promo,
                priority: Priority::LOWEST,
                is_newsletter: true,
                is_non_human,
                confidence: NEWSLETTER_CONFIDENCE,
                extracted_info,
            };
        }

        let outcome = self.score_progressively(&text);

        let signals = PrioritySignals {
            category: outcome.category,
            non_human: is_non_human,
            urgent: priority::contains_any(&text.subject, self.config.urgent_keywords()),
            important: priority::contains_any(&text.subject, self.config.important_keywords()),
            unread: message.unread,
            money_in_subject: extract::has_money(&text.subject),
        };

        ClassificationResult {
            category: outcome.category,
            priority: priority::resolve_priority(outcome.priority, &signals),
            is_newsletter,
            is_non_human,
            confidence: outcome.score,
            extracted_info,
        }
    }

    /// Whether `rules` mute `message` at `now`.
    ///
    /// Urgent exceptions use this classifier's urgent keywords.
    #[must_use]
    pub fn is_muted<T: Timelike>(&self, message: &Message, rules: &[DndRule], now: &T) -> bool {
        DndEvaluator::new(self.config.urgent_keywords().to_vec()).is_muted(message, rules, now)
    }

    /// Scores widening text windows until one is confident.
    ///
    /// Starts from sender and subject. While the best score is below the
    /// confidence threshold, the next window is scored and kept only if it
    /// scores strictly higher. The full snippet is read only when the best
    /// score is still below the deep-pass floor.
    #[must_use]
    pub fn score_progressively(&self, text: &MessageText) -> ScoreOutcome {
        let scorer = Scorer::new(self.config.table());
        let threshold = self.config.confidence_threshold();
        let floor = self.config.deep_pass_floor();
        let lines: Vec<&str> = text.snippet_lines().collect();

        let mut best = ScoreOutcome::NONE;
        let mut passes = 0;

        for window in TextWindow::PROGRESSION {
            if passes > 0 && best.score >= threshold {
                break;
            }
            if window == TextWindow::FullSnippet && best.score >= floor {
                break;
            }
            let Some(body) = window.body(text, &lines) else {
                continue;
            };

            let outcome = scorer.score(text, &body);
            passes += 1;
            if passes == 1 || outcome.score > best.score {
                best = outcome;
            }
        }

        debug!(
            passes,
            category = %best.category,
            score = best.score,
            "progressive scoring done"
        );
        best
    }
}
