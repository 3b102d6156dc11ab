use chrono::{Datelike, Days, NaiveDateTime};

use almanac_core::config::CalendarConfig;

use crate::occurrence::{OccurrenceLike, filter_pool};

use super::day::Day;
use super::week::Week;
use super::year::Year;
use super::{
    Navigable, Period, PeriodIter, add_months, impl_period, impl_period_cmp, midnight, one_tick,
    sub_months,
};

/// A calendar month, the 1st at midnight through the last instant of its
/// final day. Navigation is calendar-relative.
#[derive(Debug, Clone)]
pub struct Month<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime) -> NaiveDateTime {
    midnight(instant.date() - Days::new(u64::from(instant.date().day0())))
}

impl<O: OccurrenceLike + Clone> Month<O> {
    /// Builds the month containing `instant`.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant);
        Self {
            start,
            finish: add_months(start, 1) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the month containing a bare date; identical to constructing
    /// from its midnight.
    #[must_use]
    pub fn from_date(date: chrono::NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    /// The calendar weeks whose range overlaps this month, in order. The
    /// first and last week may extend into the adjacent months; their pools
    /// still hold only this month's filtered subset.
    pub fn weeks(&self) -> PeriodIter<Week<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Week::new(self.start, pool, self.cfg), self.finish)
    }

    /// The days of this month, each carrying the month's filtered subset.
    pub fn days(&self) -> PeriodIter<Day<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Day::new(self.start, pool, self.cfg), self.finish)
    }

    #[must_use]
    pub fn year(&self) -> Year<O> {
        Year::new(self.start, self.pool.clone(), self.cfg)
    }

    /// ## Summary
    /// The traditional calendar-page layout: one row per overlapping week,
    /// seven cells per row, `None` for leading/trailing cells whose date
    /// belongs to an adjacent month.
    #[must_use]
    pub fn calendar_page(&self) -> Vec<Vec<Option<Day<O>>>> {
        self.weeks()
            .map(|week| {
                week.days()
                    .map(|day| self.contains(day.start()).then_some(day))
                    .collect()
            })
            .collect()
    }
}

impl<O: OccurrenceLike + Clone> Navigable for Month<O> {
    fn next(&self) -> Self {
        let start = add_months(self.start, 1);
        Self {
            start,
            finish: add_months(start, 1) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        let start = sub_months(self.start, 1);
        Self {
            start,
            finish: add_months(start, 1) - one_tick(),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl<'a, O: OccurrenceLike + Clone> IntoIterator for &'a Month<O> {
    type Item = Week<O>;
    type IntoIter = PeriodIter<Week<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks()
    }
}

impl_period!(Month);
impl_period_cmp!(Month, |_span, instant| align(instant));
