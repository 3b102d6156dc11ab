/// Default first day of the week, 0-based and Sunday-first.
pub const DEFAULT_FIRST_DAY_OF_WEEK: u8 = 0;

/// Default base timezone; stored instants are naive in this zone.
pub const DEFAULT_BASE_TIMEZONE: &str = "UTC";

/// Default start-of-day for the sub-day timeslot grid.
pub const DEFAULT_TIMESLOT_START_TIME: &str = "09:00:00";

/// Default offset from the slot-grid start marking end-of-day, in minutes.
/// May exceed the remainder of the day, in which case the grid crosses midnight.
pub const DEFAULT_TIMESLOT_END_OFFSET_MINUTES: i64 = 480;

/// Default timeslot width, in minutes.
pub const DEFAULT_TIMESLOT_INTERVAL_MINUTES: i64 = 30;

/// Default hard cap on the number of occurrences a single recurrence
/// expansion may generate before aborting.
pub const DEFAULT_MAX_OCCURRENCES: usize = 1000;
