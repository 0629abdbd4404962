//! # mailrank-core
//!
//! Everything around the classification engine that an inbox needs.
//!
//! This crate provides:
//! - **Settings** - Category preferences, DND rules, plan and general preferences
//! - **Storage** - `SQLite` key-value store for settings and history
//! - **Triage** - Classification, DND and category preferences combined per message
//! - **History** - The most recent processed messages
//! - **Views** - Reply queue, missed, today, non-important and auto-delete lists

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod settings;
pub mod store;
pub mod triage;
pub mod views;

pub use error::{Error, Result};
pub use settings::{CategoryPreference, GeneralSettings, PricingTier, Settings};
pub use store::StoreRepository;
pub use triage::{HISTORY_LIMIT, History, ProcessedMessage, Triage};
