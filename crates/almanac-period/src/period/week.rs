use chrono::{NaiveDateTime, TimeDelta, Weekday};

use almanac_core::config::CalendarConfig;

use crate::locale;
use crate::occurrence::{OccurrenceLike, filter_pool};

use super::day::Day;
use super::month::Month;
use super::year::Year;
use super::{Navigable, PeriodIter, impl_period, impl_period_cmp, midnight, one_tick};

/// A calendar week. The boundary depends on the configured first day of the
/// week, read at construction.
#[derive(Debug, Clone)]
pub struct Week<O> {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    pool: Vec<O>,
    cfg: CalendarConfig,
}

fn align(instant: NaiveDateTime, first_weekday: Weekday) -> NaiveDateTime {
    midnight(locale::week_start(instant.date(), first_weekday))
}

impl<O: OccurrenceLike + Clone> Week<O> {
    /// Builds the week containing `instant` under `cfg`'s first-weekday
    /// convention.
    #[must_use]
    pub fn new(instant: NaiveDateTime, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        let start = align(instant, cfg.first_weekday);
        Self {
            start,
            finish: start + TimeDelta::weeks(1) - one_tick(),
            pool,
            cfg,
        }
    }

    /// Builds the week containing a bare date; identical to constructing
    /// from its midnight.
    #[must_use]
    pub fn from_date(date: chrono::NaiveDate, pool: Vec<O>, cfg: CalendarConfig) -> Self {
        Self::new(midnight(date), pool, cfg)
    }

    /// The seven days of this week, each carrying the week's filtered subset.
    pub fn days(&self) -> PeriodIter<Day<O>> {
        let pool = filter_pool(&self.pool, self.start, self.finish);
        PeriodIter::new(Day::new(self.start, pool, self.cfg), self.finish)
    }

    #[must_use]
    pub fn first_day(&self) -> Day<O> {
        Day::new(
            self.start,
            filter_pool(&self.pool, self.start, self.finish),
            self.cfg,
        )
    }

    #[must_use]
    pub fn last_day(&self) -> Day<O> {
        Day::new(
            self.start + TimeDelta::days(6),
            filter_pool(&self.pool, self.start, self.finish),
            self.cfg,
        )
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

impl<O: OccurrenceLike + Clone> Navigable for Week<O> {
    fn next(&self) -> Self {
        Self {
            start: self.start + TimeDelta::weeks(1),
            finish: self.finish + TimeDelta::weeks(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }

    fn previous(&self) -> Self {
        Self {
            start: self.start - TimeDelta::weeks(1),
            finish: self.finish - TimeDelta::weeks(1),
            pool: self.pool.clone(),
            cfg: self.cfg,
        }
    }
}

impl<'a, O: OccurrenceLike + Clone> IntoIterator for &'a Week<O> {
    type Item = Day<O>;
    type IntoIter = PeriodIter<Day<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

impl_period!(Week);
impl_period_cmp!(Week, |span: &Self, instant| align(
    instant,
    span.cfg.first_weekday
));
