use chrono::{NaiveDateTime, TimeDelta, Timelike};

use almanac_core::config::CalendarConfig;

use crate::occurrence::OccurrenceLike;

use super::day::Day;
use super::month::Month;
use super::week::Week;
use super::year::Year;
use super::{Navigable, impl_period, impl_period_cmp, midnight, one_tick};

/// A single clock hour. The finest granularity; no further subdivision.
#[derive(Debug, Clone)]
pub struct Hour<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime) -> NaiveDateTime {
    midnight(instant.date()) + TimeDelta::hours(i64::from(instant.hour()))
}

impl<O: OccurrenceLike + Clone> Hour<O> {
    /// Builds the hour containing `instant`.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant);
        Self {
            start,
            finish: start + TimeDelta::hours(1) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the midnight hour of a bare date.
    #[must_use]
    pub fn from_date(date: chrono::NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    #[must_use]
    pub fn day(&self) -> Day<O> {
        Day::new(self.start, self.pool.clone(), self.cfg)
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

impl<O: OccurrenceLike + Clone> Navigable for Hour<O> {
    fn next(&self) -> Self {
        Self {
            start: self.start + TimeDelta::hours(1),
            finish: self.finish + TimeDelta::hours(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        Self {
            start: self.start - TimeDelta::hours(1),
            finish: self.finish - TimeDelta::hours(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl_period!(Hour);
impl_period_cmp!(Hour, |_span, instant| align(instant));
