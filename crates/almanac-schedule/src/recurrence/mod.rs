//! Recurrence specification: a declarative description of a repeating
//! pattern of instants, submitted by an outer layer and rendered to a
//! recurrence-rule text for expansion.

pub mod expand;

pub use expand::expand;

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Recurrence frequency. Only the four calendar frequencies are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ScheduleError::UnsupportedFrequency(s.to_string()))
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

/// The Nth (or last, for −1) occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalWeekday {
    /// Occurrence number (−53 to 53, excluding 0); −1 means "last".
    pub ordinal: i8,
    pub weekday: Weekday,
}

impl OrdinalWeekday {
    #[must_use]
    pub const fn new(ordinal: i8, weekday: Weekday) -> Self {
        Self { ordinal, weekday }
    }

    /// The last such weekday of the month.
    #[must_use]
    pub const fn last(weekday: Weekday) -> Self {
        Self {
            ordinal: -1,
            weekday,
        }
    }
}

impl fmt::Display for OrdinalWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ordinal, self.weekday)
    }
}

/// How a recurrence ends: after a fixed number of occurrences or at an end
/// instant (inclusive). The two are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Count(u32),
    Until(NaiveDateTime),
}

const fn default_interval() -> u16 {
    1
}

/// A user-submitted recurrence request.
///
/// Without a termination the request describes a single occurrence: the
/// expansion yields exactly the original pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    pub frequency: Frequency,

    /// Repeat every N frequency units.
    #[serde(default = "default_interval")]
    pub interval: u16,

    #[serde(default)]
    pub termination: Option<Termination>,

    /// Weekly only: the weekdays occurrences fall on.
    #[serde(default)]
    pub weekdays: Vec<Weekday>,

    /// Monthly only: days of the month (negative counts from the end).
    #[serde(default)]
    pub month_days: Vec<i8>,

    /// Yearly only: 1-based months.
    #[serde(default)]
    pub months: Vec<u8>,

    /// Monthly or yearly: the Nth (or last) such weekday.
    #[serde(default)]
    pub ordinal: Option<OrdinalWeekday>,
}

impl RecurrenceSpec {
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            termination: None,
            weekdays: Vec::new(),
            month_days: Vec::new(),
            months: Vec::new(),
            ordinal: None,
        }
    }

    /// Creates a daily recurrence specification.
    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    /// Creates a weekly recurrence specification.
    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    /// Creates a monthly recurrence specification.
    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Creates a yearly recurrence specification.
    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u16) -> Self {
        self.interval = interval;
        self
    }

    /// Terminates after `count` occurrences.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.termination = Some(Termination::Count(count));
        self
    }

    /// Terminates at `until`, inclusive.
    #[must_use]
    pub fn with_until(mut self, until: NaiveDateTime) -> Self {
        self.termination = Some(Termination::Until(until));
        self
    }

    /// Sets the weekly weekday selector.
    #[must_use]
    pub fn on_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// Sets the monthly day-of-month selector.
    #[must_use]
    pub fn on_month_days(mut self, month_days: Vec<i8>) -> Self {
        self.month_days = month_days;
        self
    }

    /// Sets the yearly month selector.
    #[must_use]
    pub fn in_months(mut self, months: Vec<u8>) -> Self {
        self.months = months;
        self
    }

    /// Sets the ordinal-weekday selector.
    #[must_use]
    pub fn nth_weekday(mut self, ordinal: i8, weekday: Weekday) -> Self {
        self.ordinal = Some(OrdinalWeekday::new(ordinal, weekday));
        self
    }

    /// ## Summary
    /// Checks the specification for internal consistency: positive interval,
    /// selectors matching the frequency, and selector values in range.
    ///
    /// ## Errors
    /// Returns `ScheduleError::ValidationError` on the first violation.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.interval == 0 {
            return Err(ScheduleError::ValidationError(
                "interval must be positive".to_string(),
            ));
        }
        if !self.weekdays.is_empty() && self.frequency != Frequency::Weekly {
            return Err(ScheduleError::ValidationError(format!(
                "weekday selector requires WEEKLY, got {}",
                self.frequency
            )));
        }
        if !self.month_days.is_empty() && self.frequency != Frequency::Monthly {
            return Err(ScheduleError::ValidationError(format!(
                "month-day selector requires MONTHLY, got {}",
                self.frequency
            )));
        }
        if !self.months.is_empty() && self.frequency != Frequency::Yearly {
            return Err(ScheduleError::ValidationError(format!(
                "month selector requires YEARLY, got {}",
                self.frequency
            )));
        }
        if let Some(ordinal) = self.ordinal {
            if !matches!(self.frequency, Frequency::Monthly | Frequency::Yearly) {
                return Err(ScheduleError::ValidationError(format!(
                    "ordinal weekday requires MONTHLY or YEARLY, got {}",
                    self.frequency
                )));
            }
            if ordinal.ordinal == 0 || !(-53..=53).contains(&ordinal.ordinal) {
                return Err(ScheduleError::ValidationError(format!(
                    "ordinal must be in -53..=53 and non-zero, got {}",
                    ordinal.ordinal
                )));
            }
            if !self.month_days.is_empty() {
                return Err(ScheduleError::ValidationError(
                    "month-day list and ordinal weekday are mutually exclusive".to_string(),
                ));
            }
        }
        for day in &self.month_days {
            if *day == 0 || !(-31..=31).contains(day) {
                return Err(ScheduleError::ValidationError(format!(
                    "month day must be in -31..=31 and non-zero, got {day}"
                )));
            }
        }
        for month in &self.months {
            if !(1..=12).contains(month) {
                return Err(ScheduleError::ValidationError(format!(
                    "month must be in 1..=12, got {month}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for RecurrenceSpec {
    /// Renders the specification as RRULE text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("FREQ={}", self.frequency)];

        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        match self.termination {
            Some(Termination::Count(count)) => parts.push(format!("COUNT={count}")),
            Some(Termination::Until(until)) => {
                parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
            }
            None => {}
        }

        let mut by_day: Vec<String> = self.weekdays.iter().map(ToString::to_string).collect();
        if let Some(ordinal) = self.ordinal {
            by_day.push(ordinal.to_string());
        }
        if !by_day.is_empty() {
            parts.push(format!("BYDAY={}", by_day.join(",")));
        }

        if !self.month_days.is_empty() {
            let s: Vec<_> = self.month_days.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTHDAY={}", s.join(",")));
        }

        if !self.months.is_empty() {
            let s: Vec<_> = self.months.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTH={}", s.join(",")));
        }

        write!(f, "{}", parts.join(";"))
    }
}
