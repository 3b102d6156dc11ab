use anyhow::Result;
use chrono::{NaiveTime, TimeDelta, Weekday};
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::constants;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarSettings,
    pub timeslot: TimeslotSettings,
    pub recurrence: RecurrenceSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSettings {
    /// First day of the week, 0-based and Sunday-first (0 = Sunday, 6 = Saturday).
    pub first_day_of_week: u8,
    /// Base timezone name; stored instants are naive wall-clock values in this zone.
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeslotSettings {
    pub start_time: NaiveTime,
    pub end_offset_minutes: i64,
    pub interval_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceSettings {
    pub max_occurrences: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Runtime calendar configuration, snapshotted into each period at
/// construction. Reloading [`Settings`] affects subsequently constructed
/// periods only, never existing instances.
#[derive(Debug, Clone, Copy)]
pub struct CalendarConfig {
    pub first_weekday: Weekday,
    pub base_timezone: Tz,
    pub timeslot: TimeslotConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            base_timezone: chrono_tz::UTC,
            timeslot: TimeslotConfig::default(),
        }
    }
}

/// Parameters of the sub-day timeslot grid.
#[derive(Debug, Clone, Copy)]
pub struct TimeslotConfig {
    /// Daily start of the grid.
    pub start_time: NaiveTime,
    /// Offset from `start_time` marking end-of-day; may cross midnight.
    pub end_offset: TimeDelta,
    /// Slot width.
    pub interval: TimeDelta,
}

impl Default for TimeslotConfig {
    fn default() -> Self {
        Self {
            start_time: constants::DEFAULT_TIMESLOT_START_TIME
                .parse()
                .unwrap_or(NaiveTime::MIN),
            end_offset: TimeDelta::minutes(constants::DEFAULT_TIMESLOT_END_OFFSET_MINUTES),
            interval: TimeDelta::minutes(constants::DEFAULT_TIMESLOT_INTERVAL_MINUTES),
        }
    }
}

/// Bounds for recurrence expansion.
#[derive(Debug, Clone, Copy)]
pub struct RecurrenceConfig {
    /// Hard generation cap; exceeding it aborts the expansion entirely.
    pub max_occurrences: usize,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            max_occurrences: constants::DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// ## Summary
/// Maps a 0-based Sunday-first weekday index to a [`chrono::Weekday`].
///
/// Returns `None` for indices outside `0..=6`.
#[must_use]
pub const fn weekday_from_index(index: u8) -> Option<Weekday> {
    Some(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => return None,
    })
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`. Environment variables take
    /// precedence over file values; every key has a documented default.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default(
                "calendar.first_day_of_week",
                i64::from(constants::DEFAULT_FIRST_DAY_OF_WEEK),
            )?
            .set_default("calendar.timezone", constants::DEFAULT_BASE_TIMEZONE)?
            .set_default("timeslot.start_time", constants::DEFAULT_TIMESLOT_START_TIME)?
            .set_default(
                "timeslot.end_offset_minutes",
                constants::DEFAULT_TIMESLOT_END_OFFSET_MINUTES,
            )?
            .set_default(
                "timeslot.interval_minutes",
                constants::DEFAULT_TIMESLOT_INTERVAL_MINUTES,
            )?
            .set_default(
                "recurrence.max_occurrences",
                u64::try_from(constants::DEFAULT_MAX_OCCURRENCES)?,
            )?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Validates and converts the calendar settings into a [`CalendarConfig`].
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the weekday index is out
    /// of range, the base timezone name is unknown, or the timeslot values
    /// cannot form a grid.
    pub fn calendar_config(&self) -> CoreResult<CalendarConfig> {
        let first_weekday =
            weekday_from_index(self.calendar.first_day_of_week).ok_or_else(|| {
                CoreError::InvalidConfiguration(format!(
                    "first_day_of_week must be 0..=6, got {}",
                    self.calendar.first_day_of_week
                ))
            })?;

        let base_timezone = self.calendar.timezone.parse::<Tz>().map_err(|_err| {
            CoreError::InvalidConfiguration(format!(
                "unknown base timezone {:?}",
                self.calendar.timezone
            ))
        })?;

        if self.timeslot.interval_minutes <= 0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "timeslot interval must be positive, got {} minutes",
                self.timeslot.interval_minutes
            )));
        }
        if self.timeslot.end_offset_minutes < 0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "timeslot end offset must not be negative, got {} minutes",
                self.timeslot.end_offset_minutes
            )));
        }

        Ok(CalendarConfig {
            first_weekday,
            base_timezone,
            timeslot: TimeslotConfig {
                start_time: self.timeslot.start_time,
                end_offset: TimeDelta::minutes(self.timeslot.end_offset_minutes),
                interval: TimeDelta::minutes(self.timeslot.interval_minutes),
            },
        })
    }

    /// ## Summary
    /// Converts the recurrence settings into a [`RecurrenceConfig`].
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the generation cap is zero.
    pub fn recurrence_config(&self) -> CoreResult<RecurrenceConfig> {
        if self.recurrence.max_occurrences == 0 {
            return Err(CoreError::InvalidConfiguration(
                "max_occurrences must be positive".to_string(),
            ));
        }
        Ok(RecurrenceConfig {
            max_occurrences: self.recurrence.max_occurrences,
        })
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "loaded configuration");
    Ok(settings)
}
