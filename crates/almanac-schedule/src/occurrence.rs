use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use almanac_period::occurrence::{OccurrenceLike, OccurrenceLikeMut};

/// A concrete occurrence record produced by scheduling. `id` is `None`
/// until the record is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOccurrence {
    pub id: Option<Uuid>,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
}

impl ScheduledOccurrence {
    #[must_use]
    pub fn new(start: NaiveDateTime, finish: NaiveDateTime) -> Self {
        Self {
            id: None,
            start,
            finish,
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl OccurrenceLike for ScheduledOccurrence {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn finish(&self) -> NaiveDateTime {
        self.finish
    }
}

impl OccurrenceLikeMut for ScheduledOccurrence {
    fn set_start(&mut self, start: NaiveDateTime) {
        self.start = start;
    }

    fn set_finish(&mut self, finish: NaiveDateTime) {
        self.finish = finish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_period::occurrence::{LocalInstant, Localized};
    use chrono::NaiveDate;

    fn dt(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .expect("valid date")
            .and_hms_opt(h, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn test_record_localizes_through_the_proxy() {
        let record = ScheduledOccurrence::new(dt(12), dt(13));
        let mut proxy = Localized::new(
            record,
            Some(chrono_tz::Europe::Amsterdam),
            chrono_tz::UTC,
        );
        assert_eq!(proxy.start(), dt(14));
        proxy.set_start(LocalInstant::Naive(dt(8)));
        assert_eq!(proxy.real_start(), dt(8));
        assert_eq!(proxy.inner().id, None);
    }
}
