use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use almanac_core::config::CalendarConfig;

use crate::occurrence::{OccurrenceLike, filter_pool};

use super::hour::Hour;
use super::month::Month;
use super::timeslot::{self, Timeslot};
use super::week::Week;
use super::year::Year;
use super::{Navigable, PeriodIter, impl_period, impl_period_cmp, midnight, one_tick};

/// A single calendar day, midnight to midnight.
#[derive(Debug, Clone)]
pub struct Day<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime) -> NaiveDateTime {
    midnight(instant.date())
}

impl<O: OccurrenceLike + Clone> Day<O> {
    /// Builds the day containing `instant`.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant);
        Self {
            start,
            finish: start + TimeDelta::days(1) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the day for a bare date; identical to constructing from its
    /// midnight.
    #[must_use]
    pub fn from_date(date: NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    /// The 24 hours of this day, each carrying the day's filtered subset.
    pub fn hours(&self) -> PeriodIter<Hour<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Hour::new(self.start, pool, self.cfg), self.finish)
    }

    /// The fixed sub-day slot grid for this day, per the configured start
    /// time, end offset, and step.
    #[must_use]
    pub fn timeslots(&self) -> Vec<Timeslot> {
        timeslot::fixed_grid(self.start.date(), &self.cfg.timeslot)
    }

    #[must_use]
    pub fn week(&self) -> Week<O> {
        Week::new(self.start, self.pool.clone(), self.cfg)
    }

    #[must_use]
    pub fn month(&self) -> Month<O> {
        Month::new(self.start, self.pool.clone(), self.cfg)
    }

    #[must_use]
    pub fn year(&self) -> Year<O> {
        Year::new(self.start, self.pool.clone(), self.cfg)
    }
}

impl<O: OccurrenceLike + Clone> Navigable for Day<O> {
    fn next(&self) -> Self {
        Self {
            start: self.start + TimeDelta::days(1),
            finish: self.finish + TimeDelta::days(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        Self {
            start: self.start - TimeDelta::days(1),
            finish: self.finish - TimeDelta::days(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl<'a, O: OccurrenceLike + Clone> IntoIterator for &'a Day<O> {
    type Item = Hour<O>;
    type IntoIter = PeriodIter<Hour<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hours()
    }
}

impl_period!(Day);
impl_period_cmp!(Day, |_span, instant| align(instant));
