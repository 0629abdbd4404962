//! Behavioural properties of the classification engine.
//!
//! These exercise the public API only: classifier, priority resolution,
//! extraction and DND evaluation.

#![allow(clippy::unwrap_used)]

use chrono::NaiveTime;
use proptest::prelude::*;

use mailrank_engine::{
    Category, CategoryRule, Classifier, ClassifierConfig, DndException, DndRule, Error, Message,
    Priority, PrioritySignals, extract, is_muted, resolve_priority,
};

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Single-category config whose keywords never contain one another.
fn synthetic_config(len: usize, base_priority: u8) -> ClassifierConfig {
    let keywords: Vec<String> = (0..len).map(|i| format!("k{i}x")).collect();
    let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
    ClassifierConfig::new(vec![CategoryRule::new(Category::Personal, &refs, &[], base_priority)])
        .unwrap()
}

proptest! {
    #[test]
    fn prop_priority_always_in_range(
        from in ".{0,40}",
        subject in ".{0,60}",
        snippet in ".{0,200}",
        unread in any::<bool>(),
    ) {
        let message = Message::new("p", from, subject, snippet).with_unread(unread);
        let priority = Classifier::default().classify(&message).priority.get();
        prop_assert!((1..=5).contains(&priority));
    }

    #[test]
    fn prop_resolve_priority_in_range(
        base in 0u8..=9,
        category in any_category(),
        non_human in any::<bool>(),
        urgent in any::<bool>(),
        important in any::<bool>(),
        unread in any::<bool>(),
        money_in_subject in any::<bool>(),
    ) {
        let signals = PrioritySignals { category, non_human, urgent, important, unread, money_in_subject };
        let priority = resolve_priority(base, &signals);
        prop_assert!(priority >= Priority::LOWEST && priority <= Priority::HIGHEST);
    }

    #[test]
    fn prop_automated_sender_is_lowest_other(
        user in "[a-z]{0,8}",
        subject in ".{0,60}",
        snippet in ".{0,120}",
    ) {
        let message = Message::new("p", format!("noreply{user}@bank.com"), subject, snippet);
        let result = Classifier::default().classify(&message);

        prop_assert_eq!(result.priority, Priority::LOWEST);
        prop_assert_eq!(result.category, Category::Other);
        prop_assert!(result.is_non_human);
    }

    #[test]
    fn prop_classify_is_idempotent(
        from in ".{0,40}",
        subject in ".{0,60}",
        snippet in ".{0,200}",
    ) {
        let classifier = Classifier::default();
        let message = Message::new("p", from, subject, snippet);
        prop_assert_eq!(classifier.classify(&message), classifier.classify(&message));
    }

    #[test]
    fn prop_best_keyword_outranks_worst(len in 2usize..40, base in 1u8..=4) {
        let classifier = Classifier::new(synthetic_config(len, base));
        let best = classifier.classify(&Message::new("a", "friend@home.example", "k0x", ""));
        let worst = classifier.classify(&Message::new(
            "b",
            "friend@home.example",
            format!("k{}x", len - 1),
            "",
        ));

        prop_assert_eq!(best.category, Category::Personal);
        prop_assert_eq!(worst.category, Category::Personal);
        prop_assert!(best.priority >= worst.priority);
    }

    #[test]
    fn prop_urgent_subject_forces_highest(
        tail in prop::sample::select(vec!["", " tomorrow", " with the team", " follow up"]),
        unread in any::<bool>(),
    ) {
        let subject = format!("URGENT: interview{tail}");
        let message = Message::new("u", "recruiter@talent.example", subject, "").with_unread(unread);
        let result = Classifier::default().classify(&message);

        prop_assert_ne!(result.category, Category::Other);
        prop_assert_eq!(result.priority, Priority::HIGHEST);
    }

    #[test]
    fn prop_no_rules_never_mute(
        subject in ".{0,60}",
        hour in 0u32..24,
    ) {
        let now = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        prop_assert!(!is_muted(&Message::new("d", "a@b.c", subject, ""), &[], &now));
    }
}

#[test]
fn auth_code_ignores_sender() {
    for from in ["alice@example.com", "security@bank.com", ""] {
        let result = Classifier::default().classify(&Message::new("c", from, "Your code is 48213", ""));
        assert_eq!(result.category, Category::AuthCodes);
        assert_eq!(result.priority, Priority::LOWEST);
    }
}

#[test]
fn newsletter_short_circuits_to_promo() {
    let result = Classifier::default().classify(&Message::new(
        "n",
        "deals@shop.com",
        "Unsubscribe from our newsletter",
        "",
    ));

    assert_eq!(result.category, Category::Promo);
    assert_eq!(result.priority, Priority::LOWEST);
    assert!(result.is_newsletter);
}

#[test]
fn newsletter_invoice_is_scored() {
    let result = Classifier::default().classify(&Message::new(
        "n",
        "deals@shop.com",
        "Your invoice and newsletter preferences",
        "",
    ));

    assert_ne!(result.category, Category::Promo);
    assert_eq!(result.category, Category::Finance);
    assert!(result.is_newsletter);
}

#[test]
fn extraction_finds_dates_and_amounts() {
    let info = extract("Meeting on 3/15/2024, pay $250.00", "");

    assert!(info.dates.contains(&"3/15/2024".to_string()));
    assert!(info.money.contains(&"$250.00".to_string()));
}

#[test]
fn urgent_exception_bypasses_quiet_hours() {
    let rules = vec![DndRule::quiet_hours(9, 17).with_exception(DndException::urgent())];
    let classifier = Classifier::default();

    let urgent = Message::new("d", "ops@corp.com", "URGENT: server down", "");
    let digest = Message::new("d", "ops@corp.com", "Weekly digest", "");

    assert!(!classifier.is_muted(&urgent, &rules, &noon()));
    assert!(classifier.is_muted(&digest, &rules, &noon()));
}

#[test]
fn dnd_rules_decode_from_settings_shape() {
    let json = r#"[
        {"enabled": true, "timeStart": 9, "timeEnd": 17, "senders": [],
         "exceptions": [{"type": "urgent", "enabled": true}, {"type": "keyword", "value": "invoice"}]}
    ]"#;
    let rules: Vec<DndRule> = serde_json::from_str(json).unwrap();

    let message = Message::new("d", "billing@vendor.com", "Invoice #42", "");
    assert!(!is_muted(&message, &rules, &noon()));
    assert!(is_muted(&Message::new("d", "a@b.c", "Lunch?", ""), &rules, &noon()));
}

#[test]
fn empty_config_classifies_as_other() {
    let classifier = Classifier::new(ClassifierConfig::new(Vec::new()).unwrap());
    let result = classifier.classify(&Message::new("e", "hr@corp.com", "Interview invitation", ""));

    assert_eq!(result.category, Category::Other);
    assert_eq!(result.priority, Priority::LOWEST);
}

#[test]
fn unknown_category_in_json_is_rejected() {
    let json = r#"{"categories": [{"name": "gaming", "keywords": [], "domains": [], "basePriority": 2}]}"#;
    assert!(matches!(ClassifierConfig::from_json(json), Err(Error::Serde(_))));
}
