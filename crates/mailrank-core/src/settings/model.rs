//! Settings data models.

use std::collections::BTreeMap;

use mailrank_engine::{Category, DndRule};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest history window available on the free tier, in days.
pub const FREE_CONTEXT_WINDOW_DAYS: u32 = 7;

/// Badge color used when a category has no preference stored.
pub const FALLBACK_CATEGORY_COLOR: &str = "#808080";

/// Per-category display and retention preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPreference {
    /// Disabled categories are reported as `other`.
    pub enabled: bool,
    /// Badge color (hex).
    pub color: String,
    /// Days after processing when the message is hidden, if any.
    pub auto_delete: Option<u32>,
}

impl Default for CategoryPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            color: FALLBACK_CATEGORY_COLOR.to_string(),
            auto_delete: None,
        }
    }
}

impl CategoryPreference {
    fn new(color: &str, auto_delete: Option<u32>) -> Self {
        Self {
            enabled: true,
            color: color.to_string(),
            auto_delete,
        }
    }
}

/// Preferences for every category, as installed on first run.
#[must_use]
pub fn default_category_preferences() -> BTreeMap<Category, CategoryPreference> {
    BTreeMap::from([
        (Category::School, CategoryPreference::new("#4A90E2", None)),
        (Category::WorkCurrent, CategoryPreference::new("#E24A4A", None)),
        (Category::WorkOpportunities, CategoryPreference::new("#E2A44A", None)),
        (Category::Finance, CategoryPreference::new("#4AE24A", None)),
        (Category::Personal, CategoryPreference::new("#E24AE2", None)),
        (Category::AuthCodes, CategoryPreference::new("#A4A4A4", Some(1))),
        (Category::Promo, CategoryPreference::new("#FFB84D", Some(1))),
        (Category::Other, CategoryPreference::new(FALLBACK_CATEGORY_COLOR, None)),
    ])
}

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    /// Free plan, limited history window.
    #[default]
    Free,
    /// Mid plan.
    Recommended,
    /// Top plan.
    Ultra,
}

impl PricingTier {
    /// Parse from storage string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "recommended" => Self::Recommended,
            "ultra" => Self::Ultra,
            _ => Self::Free,
        }
    }

    /// Convert to storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Recommended => "recommended",
            Self::Ultra => "ultra",
        }
    }

    /// Longest context window allowed on this plan, if limited.
    #[must_use]
    pub const fn max_context_window(&self) -> Option<u32> {
        match self {
            Self::Free => Some(FREE_CONTEXT_WINDOW_DAYS),
            Self::Recommended | Self::Ultra => None,
        }
    }
}

/// Age thresholds after which old mail is cleaned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoDeleteThresholds {
    /// Older than three months.
    #[serde(rename = "3months")]
    pub three_months: bool,
    /// Older than six months.
    #[serde(rename = "6months")]
    pub six_months: bool,
    /// Older than a year.
    #[serde(rename = "1year")]
    pub one_year: bool,
}

impl Default for AutoDeleteThresholds {
    fn default() -> Self {
        Self {
            three_months: false,
            six_months: false,
            one_year: true,
        }
    }
}

/// General preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneralSettings {
    /// Days of history considered, see [`Settings::context_window`].
    pub context_window: u32,
    /// Reorder the inbox by priority.
    pub reorder_by_priority: bool,
    /// Tint rows by priority.
    pub show_priority_colors: bool,
    /// Show category badges.
    pub show_category_badges: bool,
    /// Offer thread summaries.
    pub enable_thread_summary: bool,
    /// Clean up old mail.
    pub auto_delete_old_emails: bool,
    /// Which ages count as old.
    pub auto_delete_thresholds: AutoDeleteThresholds,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            context_window: FREE_CONTEXT_WINDOW_DAYS,
            reorder_by_priority: false,
            show_priority_colors: true,
            show_category_badges: true,
            enable_thread_summary: true,
            auto_delete_old_emails: true,
            auto_delete_thresholds: AutoDeleteThresholds::default(),
        }
    }
}

/// Everything the user can configure.
///
/// Stored as four separate keys: `categories`, `dndRules`, `pricingTier`
/// and `settings` (the general preferences).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Per-category preferences.
    pub categories: BTreeMap<Category, CategoryPreference>,
    /// Do-not-disturb rules, checked in order.
    pub dnd_rules: Vec<DndRule>,
    /// Current plan.
    pub pricing_tier: PricingTier,
    /// General preferences.
    pub general: GeneralSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: default_category_preferences(),
            dnd_rules: Vec::new(),
            pricing_tier: PricingTier::default(),
            general: GeneralSettings::default(),
        }
    }
}

impl Settings {
    /// Preference for a category, or the fallback if none is stored.
    #[must_use]
    pub fn category(&self, category: Category) -> CategoryPreference {
        self.categories.get(&category).cloned().unwrap_or_default()
    }

    /// Whether results in this category are reported as-is.
    #[must_use]
    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.categories.get(&category).is_none_or(|pref| pref.enabled)
    }

    /// Context window in days, limited by the current plan.
    #[must_use]
    pub fn context_window(&self) -> u32 {
        self.pricing_tier
            .max_context_window()
            .map_or(self.general.context_window, |max| self.general.context_window.min(max))
    }

    /// Sets the context window, clamped to the plan's limit.
    ///
    /// Returns the value actually stored.
    pub fn set_context_window(&mut self, days: u32) -> u32 {
        let applied = self
            .pricing_tier
            .max_context_window()
            .map_or(days, |max| days.min(max));
        if applied != days {
            debug!(requested = days, applied, tier = self.pricing_tier.as_str(), "context window limited");
        }
        self.general.context_window = applied;
        applied
    }
}
