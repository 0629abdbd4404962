//! User settings: category preferences, DND rules, plan and general preferences.
//!
//! Settings are loaded through [`StoreRepository::load_settings`](crate::StoreRepository::load_settings),
//! which fills anything missing or unreadable with the install-time defaults.

mod model;

pub use model::{
    AutoDeleteThresholds, CategoryPreference, FALLBACK_CATEGORY_COLOR, FREE_CONTEXT_WINDOW_DAYS,
    GeneralSettings, PricingTier, Settings, default_category_preferences,
};
