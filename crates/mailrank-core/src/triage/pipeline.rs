//! Classification, DND and user preferences combined into one record.

use chrono::NaiveDateTime;
use mailrank_engine::{Category, Classifier, Message, Priority};
use tracing::debug;

use super::model::ProcessedMessage;
use crate::Settings;

/// Runs incoming messages through the classifier and the user's settings.
#[derive(Debug, Clone, Default)]
pub struct Triage {
    classifier: Classifier,
    settings: Settings,
}

impl Triage {
    /// Create a pipeline from a classifier and settings.
    #[must_use]
    pub const fn new(classifier: Classifier, settings: Settings) -> Self {
        Self {
            classifier,
            settings,
        }
    }

    /// Create a pipeline with the built-in classifier.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self::new(Classifier::default(), settings)
    }

    /// Classifier in use.
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Classify one message and check it against the DND rules.
    ///
    /// A category the user disabled is reported as `other` with the lowest
    /// priority.
    #[must_use]
    pub fn process(&self, message: Message, now: NaiveDateTime) -> ProcessedMessage {
        let mut classification = self.classifier.classify(&message);

        if !self.settings.is_category_enabled(classification.category) {
            debug!(id = %message.id, category = %classification.category, "category disabled");
            classification.category = Category::Other;
            classification.priority = Priority::LOWEST;
        }

        let is_dnd = self
            .classifier
            .is_muted(&message, &self.settings.dnd_rules, &now);

        ProcessedMessage {
            message,
            classification,
            is_dnd,
            processed_at: now,
        }
    }

    /// Process messages in order, all stamped with the same time.
    pub fn process_batch<I>(&self, messages: I, now: NaiveDateTime) -> Vec<ProcessedMessage>
    where
        I: IntoIterator<Item = Message>,
    {
        let processed: Vec<_> = messages
            .into_iter()
            .map(|message| self.process(message, now))
            .collect();
        debug!(count = processed.len(), "batch processed");
        processed
    }
}
