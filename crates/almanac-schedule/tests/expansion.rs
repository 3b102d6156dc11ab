//! End-to-end expansion cases: termination semantics, selector semantics,
//! the generation cap, commit/preview parity, and hand-off of the produced
//! pairs to the period machinery.

use almanac_core::config::{CalendarConfig, RecurrenceConfig};
use almanac_period::period::{Period, Year};
use almanac_schedule::error::ScheduleError;
use almanac_schedule::recurrence::{RecurrenceSpec, Weekday, expand};
use almanac_schedule::sink::{CommitMode, MemorySink, add_occurrences};
use chrono::{NaiveDate, NaiveDateTime};

struct ExpansionCase {
    name: &'static str,
    spec: RecurrenceSpec,
    start: NaiveDateTime,
    finish: NaiveDateTime,
    expected_starts: Vec<NaiveDateTime>,
}

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, 0, 0)
        .expect("valid time")
}

fn cases() -> Vec<ExpansionCase> {
    vec![
        ExpansionCase {
            name: "daily_count",
            spec: RecurrenceSpec::daily().with_count(3),
            start: dt(2024, 1, 1, 10),
            finish: dt(2024, 1, 1, 11),
            expected_starts: vec![dt(2024, 1, 1, 10), dt(2024, 1, 2, 10), dt(2024, 1, 3, 10)],
        },
        ExpansionCase {
            name: "no_termination_passthrough",
            spec: RecurrenceSpec::weekly().on_weekdays(vec![Weekday::Monday]),
            start: dt(2024, 1, 1, 10),
            finish: dt(2024, 1, 1, 11),
            expected_starts: vec![dt(2024, 1, 1, 10)],
        },
        ExpansionCase {
            name: "every_other_day",
            spec: RecurrenceSpec::daily().with_interval(2).with_count(3),
            start: dt(2024, 1, 1, 10),
            finish: dt(2024, 1, 1, 11),
            expected_starts: vec![dt(2024, 1, 1, 10), dt(2024, 1, 3, 10), dt(2024, 1, 5, 10)],
        },
        ExpansionCase {
            name: "weekly_until",
            spec: RecurrenceSpec::weekly().with_until(dt(2024, 1, 22, 9)),
            start: dt(2024, 1, 1, 9),
            finish: dt(2024, 1, 1, 10),
            expected_starts: vec![
                dt(2024, 1, 1, 9),
                dt(2024, 1, 8, 9),
                dt(2024, 1, 15, 9),
                dt(2024, 1, 22, 9),
            ],
        },
        ExpansionCase {
            name: "monthly_first_and_fifteenth",
            spec: RecurrenceSpec::monthly()
                .with_count(4)
                .on_month_days(vec![1, 15]),
            start: dt(2024, 1, 1, 8),
            finish: dt(2024, 1, 1, 9),
            expected_starts: vec![
                dt(2024, 1, 1, 8),
                dt(2024, 1, 15, 8),
                dt(2024, 2, 1, 8),
                dt(2024, 2, 15, 8),
            ],
        },
        ExpansionCase {
            name: "monthly_second_tuesday",
            spec: RecurrenceSpec::monthly()
                .with_count(2)
                .nth_weekday(2, Weekday::Tuesday),
            start: dt(2024, 1, 9, 19),
            finish: dt(2024, 1, 9, 21),
            expected_starts: vec![dt(2024, 1, 9, 19), dt(2024, 2, 13, 19)],
        },
        ExpansionCase {
            name: "yearly_selected_months",
            spec: RecurrenceSpec::yearly()
                .with_count(4)
                .in_months(vec![3, 9]),
            start: dt(2024, 3, 10, 12),
            finish: dt(2024, 3, 10, 13),
            expected_starts: vec![
                dt(2024, 3, 10, 12),
                dt(2024, 9, 10, 12),
                dt(2025, 3, 10, 12),
                dt(2025, 9, 10, 12),
            ],
        },
    ]
}

#[test_log::test]
fn expansion_cases() {
    for case in cases() {
        let pairs = expand(&case.spec, case.start, case.finish, &RecurrenceConfig::default())
            .unwrap_or_else(|err| panic!("case {} failed: {err}", case.name));
        let starts: Vec<_> = pairs.iter().map(|pair| pair.0).collect();
        assert_eq!(starts, case.expected_starts, "case {} did not match", case.name);

        // Every pair keeps the requested duration.
        let duration = case.finish - case.start;
        for (start, finish) in &pairs {
            assert_eq!(*finish - *start, duration, "case {} changed duration", case.name);
        }
    }
}

#[test_log::test]
fn cap_breach_aborts_with_no_partial_output() {
    let spec = RecurrenceSpec::daily().with_count(100);
    let tight = RecurrenceConfig { max_occurrences: 10 };

    let result = expand(&spec, dt(2024, 1, 1, 10), dt(2024, 1, 1, 11), &tight);
    assert!(matches!(result, Err(ScheduleError::TooManyOccurrences(10))));

    let mut sink = MemorySink::new();
    let scheduled = add_occurrences(
        &mut sink,
        &spec,
        dt(2024, 1, 1, 10),
        dt(2024, 1, 1, 11),
        CommitMode::Commit,
        &tight,
    );
    assert!(scheduled.is_err());
    assert!(sink.committed().is_empty());
}

#[test_log::test]
fn degenerate_rule_hits_the_cap_instead_of_scanning_forever() {
    // The 31st of September never exists; the rule iterator scans without
    // ever matching and must be cut off as a cap breach.
    let spec = RecurrenceSpec::yearly()
        .with_count(1)
        .in_months(vec![9])
        .nth_weekday(5, Weekday::Monday);
    let result = expand(
        &spec,
        dt(2024, 9, 30, 10),
        dt(2024, 9, 30, 11),
        &RecurrenceConfig::default(),
    );
    // September has a fifth Monday only in some years; the rule is valid
    // and must either produce the single requested occurrence or abort on
    // the cap, never hang or return a partial overrun.
    match result {
        Ok(pairs) => assert_eq!(pairs.len(), 1),
        Err(err) => assert!(matches!(err, ScheduleError::TooManyOccurrences(_))),
    }
}

#[test_log::test]
fn preview_and_commit_produce_the_same_shape() {
    let spec = RecurrenceSpec::weekly()
        .with_count(6)
        .on_weekdays(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
    let cfg = RecurrenceConfig::default();

    let mut sink = MemorySink::new();
    let previewed = add_occurrences(
        &mut sink,
        &spec,
        dt(2024, 1, 1, 9),
        dt(2024, 1, 1, 10),
        CommitMode::Preview,
        &cfg,
    )
    .expect("previews");
    let committed = add_occurrences(
        &mut sink,
        &spec,
        dt(2024, 1, 1, 9),
        dt(2024, 1, 1, 10),
        CommitMode::Commit,
        &cfg,
    )
    .expect("commits");

    assert_eq!(previewed.len(), committed.len());
    for (preview, commit) in previewed.iter().zip(&committed) {
        assert_eq!(preview.start, commit.start);
        assert_eq!(preview.finish, commit.finish);
        assert!(preview.id.is_none());
        assert!(commit.id.is_some());
    }
}

#[test_log::test]
fn expanded_pairs_feed_the_period_machinery() {
    let spec = RecurrenceSpec::monthly()
        .with_count(3)
        .on_month_days(vec![14]);
    let pairs = expand(
        &spec,
        dt(2024, 5, 14, 10),
        dt(2024, 5, 14, 11),
        &RecurrenceConfig::default(),
    )
    .expect("expands");

    let year = Year::new(dt(2024, 1, 1, 0), pairs, CalendarConfig::default());
    let busy_months: Vec<_> = year
        .months()
        .filter(|month| month.has_occurrences())
        .map(|month| month.start())
        .collect();
    assert_eq!(
        busy_months,
        vec![dt(2024, 5, 1, 0), dt(2024, 6, 1, 0), dt(2024, 7, 1, 0)]
    );
}
