//! Inbox views derived from the processed-message history.
//!
//! Each list view keeps the matching entries sorted by priority, highest
//! first. Entries of equal priority keep their history order.

use std::cmp::Reverse;

use chrono::{Duration, NaiveDateTime};
use mailrank_engine::Priority;

use crate::Settings;
use crate::triage::ProcessedMessage;

/// Lowest priority shown in the reply queue when no filter is set.
pub const REPLY_QUEUE_MIN_PRIORITY: u8 = 4;

/// Lowest priority an unread message needs to count as missed.
pub const MISSED_MIN_PRIORITY: u8 = 3;

/// Highest priority listed as non-important.
pub const NON_IMPORTANT_MAX_PRIORITY: u8 = 3;

fn by_priority(mut entries: Vec<&ProcessedMessage>) -> Vec<&ProcessedMessage> {
    entries.sort_by_key(|entry| Reverse(entry.priority()));
    entries
}

/// Messages waiting for a reply.
///
/// With a filter, only that exact priority; otherwise priority 4 and up.
#[must_use]
pub fn reply_queue(entries: &[ProcessedMessage], filter: Option<Priority>) -> Vec<&ProcessedMessage> {
    by_priority(
        entries
            .iter()
            .filter(|entry| {
                filter.map_or(entry.priority().get() >= REPLY_QUEUE_MIN_PRIORITY, |p| {
                    entry.priority() == p
                })
            })
            .collect(),
    )
}

/// Unread messages of priority 3 and up received before today.
///
/// Messages without an arrival time are never listed.
#[must_use]
pub fn missed(entries: &[ProcessedMessage], now: NaiveDateTime) -> Vec<&ProcessedMessage> {
    let today = now.date();
    by_priority(
        entries
            .iter()
            .filter(|entry| {
                entry.message.unread
                    && entry.priority().get() >= MISSED_MIN_PRIORITY
                    && entry.message.received_at.is_some_and(|at| at.date() < today)
            })
            .collect(),
    )
}

/// Messages received on the same calendar day as `now`.
#[must_use]
pub fn today(entries: &[ProcessedMessage], now: NaiveDateTime) -> Vec<&ProcessedMessage> {
    let today = now.date();
    by_priority(
        entries
            .iter()
            .filter(|entry| entry.message.received_at.is_some_and(|at| at.date() == today))
            .collect(),
    )
}

/// Messages of priority 3 and below.
#[must_use]
pub fn non_important(entries: &[ProcessedMessage]) -> Vec<&ProcessedMessage> {
    by_priority(
        entries
            .iter()
            .filter(|entry| entry.priority().get() <= NON_IMPORTANT_MAX_PRIORITY)
            .collect(),
    )
}

/// Messages processed within the last `days` days.
///
/// A window reaching past the earliest representable date keeps everything.
#[must_use]
pub fn within_days(entries: &[ProcessedMessage], days: u32, now: NaiveDateTime) -> Vec<&ProcessedMessage> {
    let cutoff = Duration::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window));
    entries
        .iter()
        .filter(|entry| cutoff.is_none_or(|cutoff| entry.processed_at >= cutoff))
        .collect()
}

/// Every entry, highest priority first, most recently processed first within a priority.
#[must_use]
pub fn order_by_priority(entries: &[ProcessedMessage]) -> Vec<&ProcessedMessage> {
    let mut ordered: Vec<_> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then_with(|| b.processed_at.cmp(&a.processed_at))
    });
    ordered
}

/// Entries whose category auto-deletes and that were processed long enough ago.
///
/// A category with no auto-delete period, or a period of zero days, keeps
/// its messages.
#[must_use]
pub fn due_for_auto_delete<'a>(
    entries: &'a [ProcessedMessage],
    settings: &Settings,
    now: NaiveDateTime,
) -> Vec<&'a ProcessedMessage> {
    entries
        .iter()
        .filter(|entry| {
            settings
                .category(entry.category())
                .auto_delete
                .filter(|days| *days > 0)
                .is_some_and(|days| now - entry.processed_at >= Duration::days(i64::from(days)))
        })
        .collect()
}
