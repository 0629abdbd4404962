//! # mailrank-engine
//!
//! Rule-based triage for inbox messages. Given a sender, subject and
//! snippet, the engine assigns a category, a 1-5 priority, newsletter and
//! automated-sender flags, and pulls out links, dates, amounts and task
//! lines. Do-not-disturb rules decide whether a message should stay quiet.
//!
//! Classification is pure and deterministic: the same message and
//! configuration always produce the same result, and nothing is persisted.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailrank_engine::{Category, Classifier, DndException, DndRule, Message};
//!
//! let classifier = Classifier::default();
//! let message = Message::new("m1", "hr@corp.com", "Interview invitation", "");
//! let result = classifier.classify(&message);
//! assert_eq!(result.category, Category::WorkOpportunities);
//!
//! let rules = vec![DndRule::quiet_hours(22, 24).with_exception(DndException::urgent())];
//! let quiet = classifier.is_muted(&message, &rules, &chrono::Local::now());
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! message ─→ automated sender? ─→ other / 1
//!         ─→ verification code? ─→ auth-codes / 1
//!         ─→ newsletter?        ─→ promo / 1
//!         ─→ progressive scoring (sender+subject, snippet lines, full snippet)
//!         ─→ priority resolution (urgent, important, minor boost)
//! ```
//!
//! ## Modules
//!
//! - [`category`]: Category enum and names
//! - [`classifier`]: Progressive classifier and its result
//! - [`config`]: Keyword tables and thresholds
//! - [`detect`]: Automated sender, newsletter and code detection
//! - [`dnd`]: Do-not-disturb rules
//! - [`extract`]: Link, date, amount and task extraction
//! - [`keywords`]: Built-in keyword lists and per-category rules
//! - [`message`]: Input message types
//! - [`priority`]: Priority scale and resolution
//! - [`scorer`]: Keyword scoring

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod category;
pub mod classifier;
pub mod config;
pub mod detect;
pub mod dnd;
mod error;
pub mod extract;
pub mod keywords;
pub mod message;
pub mod priority;
pub mod scorer;

pub use category::Category;
pub use classifier::{ClassificationResult, Classifier, TextWindow};
pub use config::ClassifierConfig;
pub use dnd::{DndEvaluator, DndException, DndRule, is_muted};
pub use error::{Error, Result};
pub use extract::{InfoBundle, extract};
pub use keywords::{CategoryRule, KeywordTable};
pub use message::{Message, MessageText};
pub use priority::{Priority, PrioritySignals, resolve_priority};
pub use scorer::{ScoreOutcome, Scorer};
