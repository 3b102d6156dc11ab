//! Timezone localization proxy for occurrence-like records.
//!
//! Stored instants are naive wall-clock values in the configured base
//! timezone. The proxy converts them to a display timezone on read and back
//! to the base timezone on write, leaving the stored values reachable via
//! [`Localized::real_start`] / [`Localized::real_finish`].

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{PeriodError, PeriodResult};

use super::{OccurrenceLike, OccurrenceLikeMut};

/// A value written back through the proxy: either a naive instant (stored
/// as-is) or a timezone-aware one (converted to the base timezone first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalInstant {
    Naive(NaiveDateTime),
    Zoned(DateTime<Tz>),
}

/// Localization proxy around exactly one occurrence-like record.
///
/// With a target timezone of `None` the proxy passes stored values through
/// unchanged. Re-targeting an existing proxy goes through
/// [`Localized::with_timezone`], which swaps the display zone while keeping
/// the inner record, so stored values are never converted twice.
#[derive(Debug, Clone)]
pub struct Localized<O> {
    record: O,
    timezone: Option<Tz>,
    base_timezone: Tz,
}

impl<O: OccurrenceLike> Localized<O> {
    #[must_use]
    pub fn new(record: O, timezone: Option<Tz>, base_timezone: Tz) -> Self {
        Self {
            record,
            timezone,
            base_timezone,
        }
    }

    /// ## Summary
    /// Builds a proxy from a timezone name. An unrecognized name degrades to
    /// pass-through rather than failing, so a typo'd name displays stored
    /// values unconverted; a warning is logged.
    #[must_use]
    pub fn by_name(record: O, timezone: &str, base_timezone: Tz) -> Self {
        match timezone.parse::<Tz>() {
            Ok(tz) => Self::new(record, Some(tz), base_timezone),
            Err(_err) => {
                tracing::warn!(
                    timezone,
                    "unrecognized timezone name, displaying stored values"
                );
                Self::new(record, None, base_timezone)
            }
        }
    }

    /// ## Summary
    /// Strict variant of [`Localized::by_name`].
    ///
    /// ## Errors
    /// Returns `PeriodError::UnknownTimezone` if the name does not resolve.
    pub fn try_by_name(record: O, timezone: &str, base_timezone: Tz) -> PeriodResult<Self> {
        let tz = timezone
            .parse::<Tz>()
            .map_err(|_err| PeriodError::UnknownTimezone(timezone.to_string()))?;
        Ok(Self::new(record, Some(tz), base_timezone))
    }

    /// ## Summary
    /// Re-targets this proxy at a different display timezone, keeping the
    /// inner record. Converting through two proxies in sequence is therefore
    /// unrepresentable: the result always reads base → `timezone` directly.
    #[must_use]
    pub fn with_timezone(self, timezone: Option<Tz>) -> Self {
        Self { timezone, ..self }
    }

    #[must_use]
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// The stored start instant, untouched by any conversion.
    #[must_use]
    pub fn real_start(&self) -> NaiveDateTime {
        self.record.start()
    }

    /// The stored finish instant, untouched by any conversion.
    #[must_use]
    pub fn real_finish(&self) -> NaiveDateTime {
        self.record.finish()
    }

    #[must_use]
    pub fn inner(&self) -> &O {
        &self.record
    }

    #[must_use]
    pub fn into_inner(self) -> O {
        self.record
    }

    fn read(&self, stored: NaiveDateTime) -> NaiveDateTime {
        let Some(tz) = self.timezone else {
            return stored;
        };
        match self.base_timezone.from_local_datetime(&stored) {
            LocalResult::Single(instant) => instant.with_timezone(&tz).naive_local(),
            // DST fold: the earliest of the two candidate offsets wins.
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&tz).naive_local(),
            LocalResult::None => {
                tracing::trace!(%stored, "stored instant falls in a DST gap, displaying unconverted");
                stored
            }
        }
    }

    fn write(&self, value: LocalInstant) -> NaiveDateTime {
        match value {
            LocalInstant::Naive(instant) => instant,
            LocalInstant::Zoned(instant) => {
                instant.with_timezone(&self.base_timezone).naive_local()
            }
        }
    }
}

impl<O: OccurrenceLikeMut> Localized<O> {
    /// Writes the start instant through the timezone conversion.
    pub fn set_start(&mut self, value: LocalInstant) {
        let stored = self.write(value);
        self.record.set_start(stored);
    }

    /// Writes the finish instant through the timezone conversion.
    pub fn set_finish(&mut self, value: LocalInstant) {
        let stored = self.write(value);
        self.record.set_finish(stored);
    }
}

impl<O: OccurrenceLike> OccurrenceLike for Localized<O> {
    fn start(&self) -> NaiveDateTime {
        self.read(self.record.start())
    }

    fn finish(&self) -> NaiveDateTime {
        self.read(self.record.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    fn record() -> (NaiveDateTime, NaiveDateTime) {
        (dt(12, 0), dt(13, 0))
    }

    #[test]
    fn test_read_converts_base_to_target() {
        // June: UTC 12:00 is 14:00 in Amsterdam (UTC+2 during DST).
        let proxy = Localized::new(record(), Some(chrono_tz::Europe::Amsterdam), chrono_tz::UTC);
        assert_eq!(proxy.start(), dt(14, 0));
        assert_eq!(proxy.finish(), dt(15, 0));
    }

    #[test]
    fn test_real_values_stay_untouched() {
        let proxy = Localized::new(record(), Some(chrono_tz::Europe::Amsterdam), chrono_tz::UTC);
        assert_eq!(proxy.real_start(), dt(12, 0));
        assert_eq!(proxy.real_finish(), dt(13, 0));
    }

    #[test]
    fn test_no_timezone_passes_through() {
        let proxy = Localized::new(record(), None, chrono_tz::UTC);
        assert_eq!(proxy.start(), dt(12, 0));
    }

    #[test]
    fn test_unknown_name_degrades_to_pass_through() {
        let proxy = Localized::by_name(record(), "Not/AZone", chrono_tz::UTC);
        assert_eq!(proxy.timezone(), None);
        assert_eq!(proxy.start(), dt(12, 0));
    }

    #[test]
    fn test_try_by_name_rejects_unknown_name() {
        let result = Localized::try_by_name(record(), "Not/AZone", chrono_tz::UTC);
        assert!(matches!(result, Err(PeriodError::UnknownTimezone(_))));
    }

    #[test]
    fn test_write_naive_stores_as_is() {
        let mut proxy = Localized::new(record(), Some(chrono_tz::Europe::Amsterdam), chrono_tz::UTC);
        proxy.set_start(LocalInstant::Naive(dt(8, 30)));
        assert_eq!(proxy.real_start(), dt(8, 30));
    }

    #[test]
    fn test_write_zoned_converts_to_base() {
        let mut proxy = Localized::new(record(), Some(chrono_tz::Europe::Amsterdam), chrono_tz::UTC);
        // Assign the displayed value back: real_start must be unchanged.
        let displayed = chrono_tz::Europe::Amsterdam
            .from_local_datetime(&proxy.start())
            .single()
            .expect("unambiguous time");
        proxy.set_start(LocalInstant::Zoned(displayed));
        assert_eq!(proxy.real_start(), dt(12, 0));
    }

    #[test]
    fn test_retargeting_never_converts_twice() {
        let direct = Localized::new(record(), Some(chrono_tz::America::New_York), chrono_tz::UTC);
        let retargeted = Localized::new(record(), Some(chrono_tz::Europe::Amsterdam), chrono_tz::UTC)
            .with_timezone(Some(chrono_tz::America::New_York));
        assert_eq!(direct.start(), retargeted.start());
        assert_eq!(direct.finish(), retargeted.finish());
    }
}
