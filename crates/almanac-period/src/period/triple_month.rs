use chrono::{Datelike, Days, NaiveDateTime};

use almanac_core::config::CalendarConfig;

use crate::occurrence::{OccurrenceLike, filter_pool};

use super::month::Month;
use super::year::Year;
use super::{
    Navigable, PeriodIter, add_months, impl_period, impl_period_cmp, midnight, one_tick,
    sub_months,
};

/// A three-month window anchored at the first of the month containing the
/// given instant. Not aligned to calendar quarters.
#[derive(Debug, Clone)]
pub struct TripleMonth<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime) -> NaiveDateTime {
    midnight(instant.date() - Days::new(u64::from(instant.date().day0())))
}

impl<O: OccurrenceLike + Clone> TripleMonth<O> {
    /// Builds the three-month window anchored at `instant`'s month.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant);
        Self {
            start,
            finish: add_months(start, 3) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the window anchored at a bare date's month.
    #[must_use]
    pub fn from_date(date: chrono::NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    /// The exactly three months of this window, in order.
    pub fn months(&self) -> PeriodIter<Month<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Month::new(self.start, pool, self.cfg), self.finish)
    }

    #[must_use]
    pub fn first_month(&self) -> Month<O> {
        self.month_at(0)
    }

    #[must_use]
    pub fn second_month(&self) -> Month<O> {
        self.month_at(1)
    }

    #[must_use]
    pub fn third_month(&self) -> Month<O> {
        self.month_at(2)
    }

    #[must_use]
    pub fn year(&self) -> Year<O> {
        Year::new(self.start, self.pool.clone(), self.cfg)
    }

    fn month_at(&self, offset: u32) -> Month<O> {
        Month::new(
            add_months(self.start, offset),
            filter_pool(&self.pool, self.start, self.finish),
            self.cfg,
        )
    }
}

impl<O: OccurrenceLike + Clone> Navigable for TripleMonth<O> {
    fn next(&self) -> Self {
        let start = add_months(self.start, 3);
        Self {
            start,
            finish: add_months(start, 3) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        let start = sub_months(self.start, 3);
        Self {
            start,
            finish: add_months(start, 3) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl<'a, O: OccurrenceLike + Clone> IntoIterator for &'a TripleMonth<O> {
    type Item = Month<O>;
    type IntoIter = PeriodIter<Month<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.months()
    }
}

impl_period!(TripleMonth);
impl_period_cmp!(TripleMonth, |_span, instant| align(instant));
