use chrono::{Datelike, Days, NaiveDateTime};

use almanac_core::config::CalendarConfig;

use crate::occurrence::{OccurrenceLike, filter_pool};

use super::day::Day;
use super::month::Month;
use super::{
    Navigable, PeriodIter, add_months, impl_period, impl_period_cmp, midnight, one_tick,
    sub_months,
};

/// A calendar year, January 1st at midnight through the last instant of
/// December 31st. The coarsest granularity.
#[derive(Debug, Clone)]
pub struct Year<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime) -> NaiveDateTime {
    midnight(instant.date() - Days::new(u64::from(instant.date().ordinal0())))
}

impl<O: OccurrenceLike + Clone> Year<O> {
    /// Builds the year containing `instant`.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant);
        Self {
            start,
            finish: add_months(start, 12) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the year containing a bare date; identical to constructing
    /// from its midnight.
    #[must_use]
    pub fn from_date(date: chrono::NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    /// The calendar months of this year, each carrying the year's filtered
    /// subset.
    pub fn months(&self) -> PeriodIter<Month<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Month::new(self.start, pool, self.cfg), self.finish)
    }

    /// Flattening to every contained day.
    pub fn days(&self) -> PeriodIter<Day<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Day::new(self.start, pool, self.cfg), self.finish)
    }
}

impl<O: OccurrenceLike + Clone> Navigable for Year<O> {
    fn next(&self) -> Self {
        let start = add_months(self.start, 12);
        Self {
            start,
            finish: add_months(start, 12) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        let start = sub_months(self.start, 12);
        Self {
            start,
            finish: add_months(start, 12) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl<'a, O: OccurrenceLike + Clone> IntoIterator for &'a Year<O> {
    type Item = Month<O>;
    type IntoIter = PeriodIter<Month<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.months()
    }
}

impl_period!(Year);
impl_period_cmp!(Year, |_span, instant| align(instant));
