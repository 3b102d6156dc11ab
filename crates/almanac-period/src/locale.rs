//! Locale-dependent week boundaries and display name tables.
//!
//! The first day of the week is a configured convention (0-based,
//! Sunday-first), read from [`almanac_core::config::CalendarConfig`] at each
//! period construction rather than cached process-wide.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// English weekday names, Sunday-first to match the configuration numbering.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Three-letter weekday abbreviations, Sunday-first.
pub const WEEKDAY_ABBRS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// English month names, January-first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// ## Summary
/// Returns the date of the most recent occurrence of `first_weekday` on or
/// before `date`, walking back at most six days.
#[must_use]
pub fn week_start(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let back =
        (7 + date.weekday().num_days_from_sunday() - first_weekday.num_days_from_sunday()) % 7;
    date - Days::new(u64::from(back))
}

/// ## Summary
/// Returns the weekday name table rotated so index 0 is `first_weekday`.
#[must_use]
pub fn rotated_weekday_names(first_weekday: Weekday) -> [&'static str; 7] {
    rotate(&WEEKDAY_NAMES, first_weekday)
}

/// ## Summary
/// Returns the weekday abbreviation table rotated so index 0 is `first_weekday`.
#[must_use]
pub fn rotated_weekday_abbrs(first_weekday: Weekday) -> [&'static str; 7] {
    rotate(&WEEKDAY_ABBRS, first_weekday)
}

/// ## Summary
/// Returns the English name of a 1-based month number, or `None` if the
/// number is outside `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

fn rotate(table: &[&'static str; 7], first_weekday: Weekday) -> [&'static str; 7] {
    let offset = first_weekday.num_days_from_sunday() as usize;
    std::array::from_fn(|i| table[(i + offset) % 7])
}
