//! Occurrence-like records and their association with periods.
//!
//! A record is anything exposing a start and a finish instant. Periods never
//! own the record type; they consume any implementor of [`OccurrenceLike`].

pub mod localized;

pub use localized::{LocalInstant, Localized};

use chrono::NaiveDateTime;
use chrono_tz::Tz;

/// The interface an occurrence-bearing record exposes to the period
/// machinery. Implementations must return the record's instants as naive
/// wall-clock values.
pub trait OccurrenceLike {
    fn start(&self) -> NaiveDateTime;
    fn finish(&self) -> NaiveDateTime;
}

/// Write access to an occurrence-like record, required for the localization
/// proxy's write-back path.
pub trait OccurrenceLikeMut: OccurrenceLike {
    fn set_start(&mut self, start: NaiveDateTime);
    fn set_finish(&mut self, finish: NaiveDateTime);
}

/// A bare `(start, finish)` pair is the minimal occurrence-like record; the
/// recurrence expansion produces exactly this shape.
impl OccurrenceLike for (NaiveDateTime, NaiveDateTime) {
    fn start(&self) -> NaiveDateTime {
        self.0
    }

    fn finish(&self) -> NaiveDateTime {
        self.1
    }
}

impl OccurrenceLikeMut for (NaiveDateTime, NaiveDateTime) {
    fn set_start(&mut self, start: NaiveDateTime) {
        self.0 = start;
    }

    fn set_finish(&mut self, finish: NaiveDateTime) {
        self.1 = finish;
    }
}

/// ## Summary
/// Filters `pool` to the records whose **start** lies within
/// `[start, finish]`, preserving relative order. A record's finish may
/// extend past the span; only its start decides membership.
pub fn occurrences_within<O: OccurrenceLike>(
    pool: &[O],
    start: NaiveDateTime,
    finish: NaiveDateTime,
) -> impl Iterator<Item = &O> {
    pool.iter().filter(move |record| {
        let record_start = record.start();
        start <= record_start && record_start <= finish
    })
}

/// ## Summary
/// Owned variant of [`occurrences_within`], used when handing a filtered
/// subset down to a child period.
pub fn filter_pool<O: OccurrenceLike + Clone>(
    pool: &[O],
    start: NaiveDateTime,
    finish: NaiveDateTime,
) -> Vec<O> {
    occurrences_within(pool, start, finish).cloned().collect()
}

/// ## Summary
/// Wraps every record in a [`Localized`] proxy targeting `timezone`
/// (`None` = pass-through), ready to hand to a period constructor.
pub fn localize_records<O: OccurrenceLike>(
    records: Vec<O>,
    timezone: Option<Tz>,
    base_timezone: Tz,
) -> Vec<Localized<O>> {
    records
        .into_iter()
        .map(|record| Localized::new(record, timezone, base_timezone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .expect("valid date")
            .and_hms_opt(h, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn test_association_filters_on_start_only() {
        // The second record finishes outside the span but starts inside it.
        let pool = vec![(dt(1, 9), dt(1, 10)), (dt(2, 23), dt(3, 2)), (dt(4, 9), dt(4, 10))];
        let hits: Vec<_> = occurrences_within(&pool, dt(2, 0), dt(3, 0)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, dt(2, 23));
    }

    #[test]
    fn test_association_preserves_order() {
        let pool = vec![(dt(2, 12), dt(2, 13)), (dt(2, 8), dt(2, 9))];
        let hits = filter_pool(&pool, dt(2, 0), dt(2, 23));
        assert_eq!(hits[0].0, dt(2, 12));
        assert_eq!(hits[1].0, dt(2, 8));
    }

    #[test]
    fn test_association_bounds_are_inclusive() {
        let pool = vec![(dt(2, 0), dt(2, 1)), (dt(3, 0), dt(3, 1))];
        let hits = filter_pool(&pool, dt(2, 0), dt(3, 0));
        assert_eq!(hits.len(), 2);
    }
}
