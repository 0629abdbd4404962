//! Priority values and the resolver that merges priority signals.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Fractional boost for unread mail and for finance subjects quoting an amount.
pub const MINOR_BOOST: f64 = 0.3;

/// Ceiling for boosts that are not urgency.
const BOOST_CAP: f64 = 4.0;

/// Floor for categorised, non-urgent mail from a human sender.
const CATEGORISED_FLOOR: f64 = 2.0;

/// Reply urgency, from 1 (low) to 5 (urgent).
///
/// The inner value is always within `1..=5`; constructors clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest priority.
    pub const LOWEST: Self = Self(1);
    /// Highest priority.
    pub const HIGHEST: Self = Self(5);

    /// Creates a priority, clamping into `1..=5`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value < 1 {
            Self::LOWEST
        } else if value > 5 {
            Self::HIGHEST
        } else {
            Self(value)
        }
    }

    /// Rounds a fractional priority score (half away from zero) and clamps it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 1..=5 first
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            return Self::LOWEST;
        }
        Self(score.round().clamp(1.0, 5.0) as u8)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            5 => "urgent",
            4 => "high",
            3 => "medium-high",
            2 => "medium",
            _ => "low",
        }
    }

    /// Display color for priority borders and badges.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self.0 {
            5 => "#FF0000",
            4 => "#FF8C00",
            3 => "#FFD700",
            2 => "#90EE90",
            _ => "#006400",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything besides the base priority that moves the final priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PrioritySignals {
    /// Category the message was classified into.
    pub category: Category,
    /// Sender is an automated system.
    pub non_human: bool,
    /// Subject contains an urgent keyword.
    pub urgent: bool,
    /// Subject contains an importance keyword.
    pub important: bool,
    /// Message is unread.
    pub unread: bool,
    /// Subject quotes a dollar amount.
    pub money_in_subject: bool,
}

/// Merges the base priority with urgency, importance and minor boosts.
///
/// Automated senders and uncategorised mail are pinned to priority 1 before
/// any boost is considered. Otherwise an urgent keyword forces 5, an
/// importance keyword adds one (capped at 4), and unread mail or a finance
/// subject quoting an amount each add a fractional 0.3 (capped at 4). The
/// intermediate score stays fractional and is only rounded at the end.
#[must_use]
pub fn resolve_priority(base: u8, signals: &PrioritySignals) -> Priority {
    if signals.non_human || signals.category == Category::Other {
        return Priority::LOWEST;
    }

    let mut score = f64::from(base);

    if signals.urgent {
        score = 5.0;
    } else if signals.important {
        score = (score + 1.0).min(BOOST_CAP);
    }

    if signals.unread && score < BOOST_CAP {
        score = (score + MINOR_BOOST).min(BOOST_CAP);
    }
    if signals.category == Category::Finance && signals.money_in_subject && score < BOOST_CAP {
        score = (score + MINOR_BOOST).min(BOOST_CAP);
    }

    if !signals.urgent && score < CATEGORISED_FLOOR {
        score = CATEGORISED_FLOOR;
    }

    Priority::from_score(score)
}

/// Whether `text` contains any of `keywords` (both expected lower-case).
#[must_use]
pub fn contains_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .any(|kw| !kw.is_empty() && text.contains(kw))
}
