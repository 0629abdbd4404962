//! Triage: turn raw messages into processed records and keep a history.
//!
//! # Example
//!
//! ```ignore
//! use mailrank_core::{StoreRepository, Triage};
//!
//! let store = StoreRepository::new("mailrank.db").await?;
//! let triage = Triage::with_settings(store.load_settings().await?);
//!
//! let processed = triage.process_batch(messages, chrono::Local::now().naive_local());
//! store.append_history(processed).await?;
//! ```

mod model;
mod pipeline;

pub use model::{HISTORY_LIMIT, History, ProcessedMessage};
pub use pipeline::Triage;
