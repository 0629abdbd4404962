//! Message categories.

use serde::{Deserialize, Serialize};

/// Class a message is sorted into.
///
/// Two categories are *reflex* categories: they are recognised by dedicated
/// pattern checks (verification codes, newsletters) and never by general
/// keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Courses, exams, assignments.
    School,
    /// Day-to-day work: meetings, reviews, deadlines.
    WorkCurrent,
    /// Recruiting, interviews, job openings.
    WorkOpportunities,
    /// Bills, payments, bank statements.
    Finance,
    /// Friends, family, social plans.
    Personal,
    /// One-time passwords and verification codes.
    AuthCodes,
    /// Promotions and newsletters.
    Promo,
    /// Nothing matched.
    #[default]
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::School,
        Self::WorkCurrent,
        Self::WorkOpportunities,
        Self::Finance,
        Self::Personal,
        Self::AuthCodes,
        Self::Promo,
        Self::Other,
    ];

    /// Parse from the kebab-case storage representation.
    ///
    /// Unknown names fall back to [`Category::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "school" => Self::School,
            "work-current" | "work_current" => Self::WorkCurrent,
            "work-opportunities" | "work_opportunities" => Self::WorkOpportunities,
            "finance" => Self::Finance,
            "personal" => Self::Personal,
            "auth-codes" | "auth_codes" => Self::AuthCodes,
            "promo" => Self::Promo,
            _ => Self::Other,
        }
    }

    /// Convert to the kebab-case storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::WorkCurrent => "work-current",
            Self::WorkOpportunities => "work-opportunities",
            Self::Finance => "finance",
            Self::Personal => "personal",
            Self::AuthCodes => "auth-codes",
            Self::Promo => "promo",
            Self::Other => "other",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::School => "School",
            Self::WorkCurrent => "Work Current",
            Self::WorkOpportunities => "Work Opportunities",
            Self::Finance => "Finance",
            Self::Personal => "Personal",
            Self::AuthCodes => "Auth Codes",
            Self::Promo => "Promo",
            Self::Other => "Other",
        }
    }

    /// Whether this category is resolved by a fast path instead of scoring.
    #[must_use]
    pub const fn is_reflex(&self) -> bool {
        matches!(self, Self::AuthCodes | Self::Promo)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
