//! Persistent key-value storage.
//!
//! Every value is stored as JSON under a string key. Settings and the
//! processed-message history use the keys defined here.

mod repository;

pub use repository::{
    CATEGORIES_KEY, DND_RULES_KEY, HISTORY_KEY, PRICING_TIER_KEY, SETTINGS_KEY, StoreRepository,
};
