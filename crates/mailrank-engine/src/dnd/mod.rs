//! Do-not-disturb rules.
//!
//! A rule mutes a message when the current hour falls inside its quiet
//! window or the sender matches one of its sender fragments, unless one of
//! the rule's own exceptions applies. Rules are checked in order and the
//! first rule that fires without an exception mutes the message.
//!
//! # Example
//!
//! ```ignore
//! use mailrank_engine::dnd::{DndEvaluator, DndException, DndRule};
//!
//! let rules = vec![DndRule::quiet_hours(9, 17).with_exception(DndException::urgent())];
//! let muted = DndEvaluator::default().is_muted(&message, &rules, &now);
//! ```

mod evaluator;
mod model;

pub use evaluator::{DndEvaluator, is_muted};
pub use model::{DndException, DndRule};
