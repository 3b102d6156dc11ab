//! Canonically aligned time spans at fixed granularities.
//!
//! Every variant holds its aligned `[start, finish]` range, the candidate
//! record pool it was constructed with, and a configuration snapshot.
//! Association (filtering the pool by containment) runs lazily on access;
//! subdivision hands each child the parent's filtered subset.

pub mod day;
pub mod hour;
pub mod month;
pub mod timeslot;
pub mod triple_month;
pub mod week;
pub mod year;

pub use day::Day;
pub use hour::Hour;
pub use month::Month;
pub use timeslot::Timeslot;
pub use triple_month::TripleMonth;
pub use week::Week;
pub use year::Year;

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use almanac_core::config::CalendarConfig;

use crate::occurrence::{OccurrenceLike, occurrences_within};

/// The smallest representable time step; spans are closed on both ends at
/// this granularity.
pub(crate) fn one_tick() -> TimeDelta {
    TimeDelta::nanoseconds(1)
}

pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// Month and year navigation is calendar-relative: advance by calendar
// months, never by a fixed number of seconds.
pub(crate) fn add_months(instant: NaiveDateTime, months: u32) -> NaiveDateTime {
    instant
        .checked_add_months(Months::new(months))
        .expect("datetime out of range")
}

pub(crate) fn sub_months(instant: NaiveDateTime, months: u32) -> NaiveDateTime {
    instant
        .checked_sub_months(Months::new(months))
        .expect("datetime out of range")
}

/// Common behavior of every concrete span variant.
pub trait Period {
    type Record: OccurrenceLike + Clone;

    /// Canonical beginning of the span.
    fn start(&self) -> NaiveDateTime;

    /// Last instant of the span (`start + interval` minus one tick).
    fn finish(&self) -> NaiveDateTime;

    /// The candidate records this span was constructed with, unfiltered.
    fn pool(&self) -> &[Self::Record];

    /// The configuration snapshot taken at construction.
    fn config(&self) -> CalendarConfig;

    /// Whether `instant` lies within `[start, finish]`.
    fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start() <= instant && instant <= self.finish()
    }

    /// Whether the midnight of `date` lies within the span.
    fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(midnight(date))
    }

    /// The records whose start lies within the span, in pool order.
    fn occurrences(&self) -> Vec<&Self::Record> {
        occurrences_within(self.pool(), self.start(), self.finish()).collect()
    }

    fn has_occurrences(&self) -> bool {
        occurrences_within(self.pool(), self.start(), self.finish())
            .next()
            .is_some()
    }
}

/// Navigation to the adjacent span of the same granularity. The candidate
/// pool is carried forward unfiltered; association re-runs lazily on access.
///
/// ## Panics
/// `next` and `previous` panic if the result would leave chrono's
/// representable datetime range.
pub trait Navigable: Sized {
    fn next(&self) -> Self;
    fn previous(&self) -> Self;
}

/// Lazy, finite iterator over consecutive spans, ending after the last span
/// that starts on or before `end`. Subdivision methods return a fresh
/// instance on every call, so iteration is restartable.
#[derive(Debug)]
pub struct PeriodIter<P> {
    current: Option<P>,
    end: NaiveDateTime,
}

impl<P: Period + Navigable> PeriodIter<P> {
    pub(crate) fn new(first: P, end: NaiveDateTime) -> Self {
        Self {
            current: Some(first),
            end,
        }
    }
}

impl<P: Period + Navigable> Iterator for PeriodIter<P> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let current = self.current.take()?;
        if current.start() > self.end {
            return None;
        }
        self.current = Some(Navigable::next(&current));
        Some(current)
    }
}

/// Implements [`Period`] for a span struct with the conventional field set.
macro_rules! impl_period {
    ($ty:ident) => {
        impl<O: crate::occurrence::OccurrenceLike + Clone> crate::period::Period for $ty<O> {
            type Record = O;

            fn start(&self) -> chrono::NaiveDateTime {
                self.start
            }

            fn finish(&self) -> chrono::NaiveDateTime {
                self.finish
            }

            fn pool(&self) -> &[O] {
                &self.pool
            }

            fn config(&self) -> almanac_core::config::CalendarConfig {
                self.cfg
            }
        }
    };
}

/// Implements the comparison surface for a span struct: ordering between
/// same-variant spans on `start`, and equality/ordering against raw instants
/// and dates normalized through the variant's own alignment.
macro_rules! impl_period_cmp {
    ($ty:ident, $align:expr) => {
        impl<O: crate::occurrence::OccurrenceLike + Clone> PartialEq for $ty<O> {
            fn eq(&self, other: &Self) -> bool {
                self.start == other.start
            }
        }

        impl<O: crate::occurrence::OccurrenceLike + Clone> Eq for $ty<O> {}

        impl<O: crate::occurrence::OccurrenceLike + Clone> PartialOrd for $ty<O> {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<O: crate::occurrence::OccurrenceLike + Clone> Ord for $ty<O> {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.start.cmp(&other.start)
            }
        }

        impl<O: crate::occurrence::OccurrenceLike + Clone> PartialEq<chrono::NaiveDateTime>
            for $ty<O>
        {
            fn eq(&self, rhs: &chrono::NaiveDateTime) -> bool {
                let align: fn(&Self, chrono::NaiveDateTime) -> chrono::NaiveDateTime = $align;
                self.start == align(self, *rhs)
            }
        }

        impl<O: crate::occurrence::OccurrenceLike + Clone> PartialOrd<chrono::NaiveDateTime>
            for $ty<O>
        {
            fn partial_cmp(&self, rhs: &chrono::NaiveDateTime) -> Option<core::cmp::Ordering> {
                let align: fn(&Self, chrono::NaiveDateTime) -> chrono::NaiveDateTime = $align;
                Some(self.start.cmp(&align(self, *rhs)))
            }
        }

        impl<O: crate::occurrence::OccurrenceLike + Clone> PartialEq<chrono::NaiveDate>
            for $ty<O>
        {
            fn eq(&self, rhs: &chrono::NaiveDate) -> bool {
                *self == crate::period::midnight(*rhs)
            }
        }
    };
}

pub(crate) use impl_period;
pub(crate) use impl_period_cmp;
