use chrono::NaiveDate;
use regimen_pattern::{ExpansionWindow, RecurringPattern, expand};

pub struct PatternCase {
    pub name: &'static str,
    pub pattern: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub max_results: Option<usize>,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn pattern_cases() -> Vec<PatternCase> {
    vec![
        PatternCase {
            name: "daily_every_second_day",
            pattern: r#"{"name":"Iron","pattern_type":"daily","frequency":2,"start_date":"2024-01-01","time":"08:00"}"#,
            start: "2024-01-01",
            end: "2024-01-10",
            max_results: None,
            expected: &[
                "2024-01-01",
                "2024-01-03",
                "2024-01-05",
                "2024-01-07",
                "2024-01-09",
            ],
        },
        PatternCase {
            name: "weekly_mon_wed_fri",
            pattern: r#"{"name":"Gym","pattern_type":"weekly","days_of_week":[1,3,5],"start_date":"2024-01-01","time":"18:00"}"#,
            start: "2024-01-01",
            end: "2024-01-14",
            max_results: None,
            expected: &[
                "2024-01-01",
                "2024-01-03",
                "2024-01-05",
                "2024-01-08",
                "2024-01-10",
                "2024-01-12",
            ],
        },
        PatternCase {
            name: "biweekly_monday",
            pattern: r#"{"name":"Long run","pattern_type":"biweekly","days_of_week":[1],"start_date":"2024-01-01","time":"07:00"}"#,
            start: "2024-01-01",
            end: "2024-02-12",
            max_results: None,
            expected: &["2024-01-01", "2024-01-15", "2024-01-29", "2024-02-12"],
        },
        PatternCase {
            name: "monthly_31st_skips_short_months",
            pattern: r#"{"name":"Refill","pattern_type":"monthly","days_of_month":[31],"start_date":"2024-01-01","time":"09:00"}"#,
            start: "2024-01-01",
            end: "2024-04-30",
            max_results: None,
            expected: &["2024-01-31", "2024-03-31"],
        },
        PatternCase {
            name: "daily_with_exception",
            pattern: r#"{"name":"Water","pattern_type":"daily","frequency":1,"start_date":"2024-01-01","exceptions":["2024-01-05"],"max_occurrences":6,"time":"10:00"}"#,
            start: "2024-01-01",
            end: "2024-01-07",
            max_results: None,
            expected: &[
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-06",
                "2024-01-07",
            ],
        },
        PatternCase {
            name: "lifetime_cap_after_two",
            pattern: r#"{"name":"Antibiotic","pattern_type":"daily","frequency":1,"start_date":"2024-01-01","max_occurrences":3,"time":"12:00"}"#,
            start: "2024-01-03",
            end: "2024-01-11",
            max_results: None,
            expected: &["2024-01-03"],
        },
        PatternCase {
            name: "exception_on_non_matching_day",
            pattern: r#"{"name":"Gym","pattern_type":"weekly","days_of_week":[1],"start_date":"2024-01-01","exceptions":["2024-01-02"],"time":"18:00"}"#,
            start: "2024-01-01",
            end: "2024-01-14",
            max_results: None,
            expected: &["2024-01-01", "2024-01-08"],
        },
        PatternCase {
            name: "biweekly_parity_shifts_with_start",
            pattern: r#"{"name":"Long run","pattern_type":"biweekly","days_of_week":[1],"start_date":"2024-01-08","time":"07:00"}"#,
            start: "2024-01-01",
            end: "2024-02-12",
            max_results: None,
            expected: &["2024-01-08", "2024-01-22", "2024-02-05"],
        },
        PatternCase {
            name: "end_date_and_max_results",
            pattern: r#"{"name":"Stretch","pattern_type":"daily","start_date":"2024-02-26","end_date":"2024-03-02","time":"06:30"}"#,
            start: "2024-02-01",
            end: "2024-03-31",
            max_results: Some(4),
            expected: &["2024-02-26", "2024-02-27", "2024-02-28", "2024-02-29"],
        },
        PatternCase {
            name: "disabled_pattern",
            pattern: r#"{"name":"Paused","pattern_type":"daily","start_date":"2024-01-01","enabled":false}"#,
            start: "2024-01-01",
            end: "2024-12-31",
            max_results: None,
            expected: &[],
        },
        PatternCase {
            name: "monthly_leap_day",
            pattern: r#"{"name":"Review","pattern_type":"monthly","days_of_month":[29],"start_date":"2023-01-01"}"#,
            start: "2023-01-01",
            end: "2024-03-31",
            max_results: None,
            expected: &[
                "2023-01-29",
                "2023-03-29",
                "2023-04-29",
                "2023-05-29",
                "2023-06-29",
                "2023-07-29",
                "2023-08-29",
                "2023-09-29",
                "2023-10-29",
                "2023-11-29",
                "2023-12-29",
                "2024-01-29",
                "2024-02-29",
                "2024-03-29",
            ],
        },
    ]
}

pub fn assert_case(case: &PatternCase) {
    let pattern: RecurringPattern = serde_json::from_str(case.pattern)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));

    let mut window = ExpansionWindow::new(parse_date(case.start), parse_date(case.end));
    if let Some(max) = case.max_results {
        window = window.with_max_results(max);
    }

    let actual = expand(&pattern, &window)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {}", case.name, err));
    let expected: Vec<NaiveDate> = case.expected.iter().map(|value| parse_date(value)).collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}
