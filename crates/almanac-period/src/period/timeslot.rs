//! Fixed-width sub-day scheduling grid.
//!
//! The grid is a pure function of three configured values: the daily start
//! time, the end-of-day offset (which may cross midnight), and the step.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use almanac_core::config::TimeslotConfig;

use super::one_tick;

/// One fixed-width slot of a day's booking grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeslot {
    start: NaiveDateTime,
    finish: NaiveDateTime,
}

impl Timeslot {
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn finish(&self) -> NaiveDateTime {
        self.finish
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.finish
    }
}

/// ## Summary
/// Builds the slot grid for the day beginning on `date`: one slot at each
/// point of `[start_time, start_time + step, …]`, emitted while the point
/// precedes end-of-day plus one terminal slot at the first point on or past
/// it. Each slot is exactly one step wide.
#[must_use]
pub fn fixed_grid(date: NaiveDate, cfg: &TimeslotConfig) -> Vec<Timeslot> {
    // A non-positive step cannot advance; configuration validation is the
    // real gate, this only keeps the loop finite.
    if cfg.interval <= TimeDelta::zero() {
        return Vec::new();
    }

    let grid_start = date.and_time(cfg.start_time);
    let grid_end = grid_start + cfg.end_offset;

    let mut slots = Vec::new();
    let mut point = grid_start;
    loop {
        slots.push(Timeslot {
            start: point,
            finish: point + cfg.interval - one_tick(),
        });
        if point >= grid_end {
            break;
        }
        point += cfg.interval;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn cfg(start: (u32, u32), end_offset_minutes: i64, interval_minutes: i64) -> TimeslotConfig {
        TimeslotConfig {
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid time"),
            end_offset: TimeDelta::minutes(end_offset_minutes),
            interval: TimeDelta::minutes(interval_minutes),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid date")
    }

    fn time(d: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        d.and_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn test_grid_includes_terminal_point() {
        // 09:00 to 17:00 in 30-minute steps: 16 slots before the end plus
        // the terminal slot at 17:00.
        let slots = fixed_grid(date(), &cfg((9, 0), 480, 30));
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0].start(), time(date(), 9, 0));
        assert_eq!(slots[16].start(), time(date(), 17, 0));
    }

    #[test]
    fn test_grid_slots_are_step_wide_and_contiguous() {
        let slots = fixed_grid(date(), &cfg((9, 0), 480, 30));
        for pair in slots.windows(2) {
            assert_eq!(pair[0].start() + TimeDelta::minutes(30), pair[1].start());
            assert_eq!(pair[0].finish() + TimeDelta::nanoseconds(1), pair[1].start());
        }
    }

    #[test]
    fn test_grid_crosses_midnight() {
        // 22:00 with a six-hour day ends at 04:00 the next morning.
        let slots = fixed_grid(date(), &cfg((22, 0), 360, 60));
        let last = slots.last().expect("non-empty grid");
        assert_eq!(
            last.start(),
            time(date() + chrono::Days::new(1), 4, 0)
        );
    }

    #[test]
    fn test_grid_with_uneven_step_overshoots_to_first_point_past_end() {
        // 09:00 to 10:00 in 45-minute steps: 09:00, 09:45, then 10:30 as the
        // first point past the end.
        let slots = fixed_grid(date(), &cfg((9, 0), 60, 45));
        let starts: Vec<_> = slots.iter().map(Timeslot::start).collect();
        assert_eq!(
            starts,
            vec![time(date(), 9, 0), time(date(), 9, 45), time(date(), 10, 30)]
        );
    }

    #[test]
    fn test_zero_step_yields_no_grid() {
        let slots = fixed_grid(date(), &cfg((9, 0), 480, 0));
        assert!(slots.is_empty());
    }
}
