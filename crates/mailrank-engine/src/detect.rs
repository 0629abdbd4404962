//! Cheap pre-filters that run before any scoring.
//!
//! All inputs are expected to be lower-cased already.

use std::sync::LazyLock;

use regex::Regex;

use crate::MessageText;

#[allow(clippy::expect_used)] // literal pattern
static CODE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4,8}\b").expect("valid code regex"));

/// Sender/subject fragments that mark an automated sender.
const NON_HUMAN_MARKERS: &[&str] = &[
    "noreply", "no-reply", "donotreply", "do not reply", "do-not-reply", "no_reply",
    "bot@", "automation@", "system@", "mailer@", "mailer-daemon", "postmaster@",
    "mail delivery", "automated", "automatic",
];

/// Automated-reply phrasing looked for in the first snippet line.
const AUTOMATED_REPLY_PHRASES: &[&str] = &[
    "this is an automated", "this email was sent automatically", "please do not reply",
    "do not reply to this email", "delivery failure", "delivery status", "undeliverable",
    "bounce", "out of office", "out-of-office", "automatic reply", "auto-reply",
];

/// Bulk and transactional mail providers.
const TRANSACTIONAL_DOMAINS: &[&str] = &[
    "mailchimp.com", "constantcontact.com", "sendgrid.net", "mandrillapp.com",
    "amazonaws.com", "salesforce.com", "hubspot.com", "marketo.com",
];

/// Sender/subject fragments that mark bulk mail.
const NEWSLETTER_MARKERS: &[&str] = &[
    "unsubscribe", "newsletter", "noreply", "no-reply", "donotreply", "mailing list",
    "mailchimp", "constant contact",
];

/// Subject words that keep bulk mail out of the promo fast path.
const TRANSACTIONAL_SUBJECT_WORDS: &[&str] = &["invoice", "payment", "receipt"];

fn found_in(from: &str, subject: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| from.contains(m) || subject.contains(m))
}

/// Whether sender or subject identifies an automated sender.
///
/// Needs no body text, so it runs before anything else.
#[must_use]
pub fn is_non_human(from: &str, subject: &str) -> bool {
    found_in(from, subject, NON_HUMAN_MARKERS)
}

/// Deeper automated-sender check.
///
/// Adds the first snippet line (auto-reply / bounce phrasing) and the sender
/// domain (known bulk providers) to [`is_non_human`].
#[must_use]
pub fn is_non_human_deep(text: &MessageText) -> bool {
    if is_non_human(&text.from, &text.subject) {
        return true;
    }

    let first_line = text.snippet.split('\n').next().unwrap_or_default();
    if AUTOMATED_REPLY_PHRASES.iter().any(|p| first_line.contains(p)) {
        return true;
    }

    !text.domain.is_empty() && TRANSACTIONAL_DOMAINS.iter().any(|d| text.domain.contains(d))
}

/// Whether sender or subject identifies a newsletter or mailing list.
#[must_use]
pub fn is_newsletter(from: &str, subject: &str) -> bool {
    found_in(from, subject, NEWSLETTER_MARKERS)
}

/// Whether the subject reads like a bill or receipt.
///
/// Bulk senders reuse noreply addresses for invoices; those must not be
/// filed as promotions.
#[must_use]
pub fn is_transactional_subject(subject: &str) -> bool {
    TRANSACTIONAL_SUBJECT_WORDS.iter().any(|w| subject.contains(w))
}

/// Whether the subject announces a one-time code.
///
/// Needs a standalone 4 to 8 digit number plus "code" or "verify".
#[must_use]
pub fn is_auth_code(subject: &str) -> bool {
    (subject.contains("code") || subject.contains("verify")) && CODE_NUMBER.is_match(subject)
}
