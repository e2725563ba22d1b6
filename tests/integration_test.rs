//! Integration tests for extraction, registry priority and configuration

use std::io::Write;
use std::sync::Arc;

use spendscan::{
    DiagnosticEvent, Direction, Extraction, MemorySink, PatternRegistry, PatternSetConfig,
    RawMessage, TransactionExtractor,
};

fn default_extractor() -> TransactionExtractor {
    TransactionExtractor::with_default_pattern().unwrap()
}

#[test]
fn test_exact_template_extraction() {
    let rec = default_extractor()
        .extract("You spent $50.00 at Amazon on 2025-08-16")
        .unwrap();

    assert_eq!(rec.amount, 50.00);
    assert_eq!(rec.merchant, "Amazon");
    assert_eq!(rec.date.as_deref(), Some("2025-08-16"));
    assert_eq!(rec.direction, Direction::Debit);
}

#[test]
fn test_template_found_mid_string() {
    let rec = default_extractor()
        .extract("Hi! You spent $12.50 at Joe's Cafe on 2024-01-05. Thanks.")
        .unwrap();

    assert_eq!(rec.amount, 12.50);
    assert_eq!(rec.merchant, "Joe's Cafe");
    assert_eq!(rec.date.as_deref(), Some("2024-01-05"));
}

#[test]
fn test_strings_without_prefix_never_match() {
    let extractor = default_extractor();
    for body in [
        "",
        "hello",
        "you spent $50.00 at Amazon on 2025-08-16", // case matters
        "You received $50.00 at Amazon on 2025-08-16",
        "Rs. 89.00 debited from A/c **1234",
    ] {
        assert!(extractor.extract(body).is_none(), "unexpected match: {:?}", body);
    }
}

#[test]
fn test_amount_without_two_decimals_rejected() {
    assert!(default_extractor()
        .extract("You spent $5 at Amazon on 2025-08-16")
        .is_none());
}

#[test]
fn test_hostile_inputs_do_not_panic() {
    let extractor = default_extractor();

    assert!(extractor.extract(&"$".repeat(100_000)).is_none());
    assert!(extractor.extract("You spent $\u{0}1.00 at X on 2025-01-01").is_none());
    assert!(extractor.extract("日本語のテキスト ₹ ¥ €").is_none());

    let long_tail = format!("You spent $1.00 at M on 2025-01-01{}", "a".repeat(100_000));
    assert!(extractor.extract(&long_tail).is_some());
}

#[test]
fn test_extraction_is_idempotent() {
    let extractor = default_extractor();
    let body = "You spent $7.77 at Lucky Diner on 2025-07-07";
    assert_eq!(extractor.extract(body), extractor.extract(body));
}

#[test]
fn test_parallel_extraction_is_safe() {
    let extractor = Arc::new(TransactionExtractor::with_builtin_patterns().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let extractor = Arc::clone(&extractor);
            std::thread::spawn(move || {
                let body = format!("You spent ${}.00 at Shop on 2025-01-0{}", i + 1, i + 1);
                extractor.extract(&body).map(|r| r.amount)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some((i + 1) as f64));
    }
}

#[test]
fn test_builtin_registry_parses_provider_notifications() {
    let extractor = TransactionExtractor::with_builtin_patterns().unwrap();

    let rec = extractor
        .try_extract(&RawMessage::with_sender(
            "INR 250.00 has been debited from your A/c XXXX1234 on 21-Jul-25 towards UPI/merchant@okaxis. Bal: INR 5,320.00",
            "HDFCBK",
        ))
        .into_record()
        .unwrap();
    assert_eq!(rec.amount, 250.00);
    assert_eq!(rec.provider, "HDFC");
    assert_eq!(rec.currency, "INR");
    assert_eq!(rec.date.as_deref(), Some("21-Jul-25"));

    let rec = extractor
        .extract("₹300 received from John Doe via Paytm UPI. Ref: PTM123456789")
        .unwrap();
    assert_eq!(rec.direction, Direction::Credit);
    assert_eq!(rec.merchant, "John Doe");
}

#[test]
fn test_default_variant_ignores_provider_notifications() {
    // The single-pattern configuration only knows the fixed template
    let extractor = default_extractor();
    assert!(extractor
        .extract("₹150 paid to Zomato via PhonePe UPI")
        .is_none());
}

#[test]
fn test_diagnostics_are_observable() {
    let sink = Arc::new(MemorySink::new());
    let extractor = TransactionExtractor::with_default_pattern()
        .unwrap()
        .with_sink(sink.clone());

    extractor.extract("You spent $3.00 at Kiosk on 2025-02-02");
    extractor.extract("unrelated text");

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], DiagnosticEvent::Extracted { merchant, .. } if merchant == "Kiosk"));
    assert_eq!(events[1], DiagnosticEvent::NoMatch);
}

#[test]
fn test_typed_outcome_distinguishes_no_match() {
    let extractor = default_extractor();
    let outcome = extractor.try_extract(&RawMessage::new("nothing here"));
    assert!(matches!(outcome, Extraction::NoMatch));
}

#[test]
fn test_configured_patterns_extend_builtins() {
    let yaml = r#"
patterns:
  - name: euro_card
    regex: 'Card charge: EUR (?P<amount>\d+\.\d{2}) at (?P<merchant>.+?) \((?P<date>\d{4}-\d{2}-\d{2})\)'
    direction: debit
    currency: EUR
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = PatternSetConfig::load_from_file(file.path()).unwrap();
    let mut registry = PatternRegistry::builtin().unwrap();
    config.apply_to(&mut registry).unwrap();

    let extractor = TransactionExtractor::new(registry);
    let rec = extractor
        .extract("Card charge: EUR 23.40 at Bäckerei Brot (2025-04-01)")
        .unwrap();

    assert_eq!(rec.amount, 23.40);
    assert_eq!(rec.merchant, "Bäckerei Brot");
    assert_eq!(rec.currency, "EUR");
    assert_eq!(rec.provider, "euro_card");
}

#[test]
fn test_builtins_keep_priority_over_configured() {
    let yaml = r#"
patterns:
  - name: greedy_dollar
    regex: '\$(?P<amount>\d+\.\d{2})'
"#;

    let config = PatternSetConfig::from_yaml(yaml).unwrap();
    let mut registry = PatternRegistry::with_default().unwrap();
    config.apply_to(&mut registry).unwrap();

    let extractor = TransactionExtractor::new(registry);

    // The fixed template is registered first and wins
    let rec = extractor
        .extract("You spent $8.00 at Stand on 2025-09-09")
        .unwrap();
    assert_eq!(rec.provider, "spent");

    // The configured pattern picks up what the template rejects
    let rec = extractor.extract("random $8.00 charge").unwrap();
    assert_eq!(rec.provider, "greedy_dollar");
}

#[test]
fn test_batch_summary_over_mixed_corpus() {
    let extractor = TransactionExtractor::with_builtin_patterns().unwrap();

    let summary = extractor.extract_batch(vec![
        RawMessage::new("You spent $50.00 at Amazon on 2025-08-16"),
        RawMessage::new("₹150 paid to Zomato via PhonePe UPI"),
        RawMessage::new("see you at lunch"),
        RawMessage::new(""),
    ]);

    assert_eq!(summary.parsed, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.records[0].currency, "USD");
    assert_eq!(summary.records[1].currency, "INR");
}

#[test]
fn test_spam_filter_end_to_end() {
    let extractor = TransactionExtractor::with_builtin_patterns()
        .unwrap()
        .with_spam_filter()
        .unwrap();

    // Would match the generic fallback without the screen
    let spam = "Congratulations! Rs 5,000.00 credited as lucky UPI reward, claim now";
    assert!(extractor.extract(spam).is_none());
}

#[test]
fn test_categorization_end_to_end() {
    let extractor = TransactionExtractor::with_builtin_patterns()
        .unwrap()
        .with_categorization();

    let rec = extractor
        .extract("₹150 paid to Zomato via PhonePe UPI")
        .unwrap();
    assert_eq!(rec.category.as_deref(), Some("Food & Dining"));
}
