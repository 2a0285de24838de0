//! Tests for submission file name parsing.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use kodiak_model::{DuplicateStrategy, ModelError, SubmissionFilename};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn parses_separator_inside_original_filename() {
    let name = SubmissionFilename::parse(
        "13394-80551 - Eric Gillotti - Mar 29, 2018 1205 PM - EGillotti - Homework 6.zip",
    )
    .unwrap();

    assert_eq!(name.submission_id(), "13394-80551");
    assert_eq!(name.first_name(), "Eric");
    assert_eq!(name.last_name(), "Gillotti");
    assert_eq!(name.submission_time(), at(2018, 3, 29, 12, 5));
    assert_eq!(name.original_filename(), "EGillotti - Homework 6.zip");
}

#[test]
fn parses_via_from_str() {
    let name: SubmissionFilename = "11824-66708 - Lucy Pelt - Feb 9, 2017 1004 PM - LPelt_HW4.pdf"
        .parse()
        .unwrap();
    assert_eq!(name.submission_time(), at(2017, 2, 9, 22, 4));
    assert_eq!(name.student_key(), "Pelt_Lucy");
}

#[test]
fn rejects_too_few_fields() {
    let err = SubmissionFilename::parse("11824-66708 - Lucy Pelt - LPelt_HW4.pdf").unwrap_err();
    assert!(matches!(err, ModelError::MalformedSubmissionName { .. }));
    assert!(err.to_string().contains("expected 4 fields"));
}

#[test]
fn rejects_index_file() {
    assert!(SubmissionFilename::parse("index.html").is_err());
}

#[test]
fn rejects_wrong_name_token_count() {
    for raw in [
        "1 - Lucy - Feb 9, 2017 1004 PM - a.pdf",
        "1 - Lucy van Pelt - Feb 9, 2017 1004 PM - a.pdf",
        "1 - Lucy  Pelt - Feb 9, 2017 1004 PM - a.pdf",
    ] {
        let err = SubmissionFilename::parse(raw).unwrap_err();
        assert!(
            matches!(err, ModelError::MalformedSubmissionName { .. }),
            "{raw}"
        );
    }
}

#[test]
fn strategy_serializes_kebab_case() {
    let json = serde_json::to_string(&DuplicateStrategy::NewestOnly).unwrap();
    assert_eq!(json, "\"newest-only\"");
}

proptest! {
    #[test]
    fn hour_and_minute_split_from_the_end(hour in 1u32..=12, minute in 0u32..60, pm: bool) {
        let meridiem = if pm { "PM" } else { "AM" };
        let raw = format!("1 - Ann Lee - Jan 2, 2019 {hour}{minute:02} {meridiem} - f.txt");
        let name = SubmissionFilename::parse(&raw).unwrap();

        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        prop_assert_eq!(name.submission_time(), at(2019, 1, 2, hour24, minute));
    }
}
