//! Scenario table shared with the expander's unit tests.

include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/pattern_cases_data/mod.rs"));

/// ## Summary
/// Validates expansion behavior through the public API using shared cases.
#[test_log::test]
fn pattern_cases_integration() {
    for case in pattern_cases() {
        assert_case(&case);
    }
}

/// ## Summary
/// Lifetime cap holds across consecutive, non-overlapping windows.
#[test]
fn lifetime_cap_across_windows() {
    let pattern: RecurringPattern = serde_json::from_str(
        r#"{"name":"Course","pattern_type":"weekly","days_of_week":[2,4],"start_date":"2024-01-01","max_occurrences":5,"exceptions":["2024-01-09"]}"#,
    )
    .expect("valid pattern");

    let mut total = Vec::new();
    let mut from = parse_date("2024-01-01");
    for _ in 0..12 {
        let to = from + chrono::Days::new(6);
        total.extend(expand(&pattern, &ExpansionWindow::new(from, to)).expect("expansion"));
        from = to + chrono::Days::new(1);
    }

    let expected: Vec<NaiveDate> = ["2024-01-02", "2024-01-04", "2024-01-11", "2024-01-16", "2024-01-18"]
        .iter()
        .map(|value| parse_date(value))
        .collect();
    assert_eq!(total, expected);
}
