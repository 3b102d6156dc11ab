//! Occurrence materialization: maps expanded pairs into records through an
//! abstract persistence sink, in commit or preview mode.

use chrono::NaiveDateTime;
use uuid::Uuid;

use almanac_core::config::RecurrenceConfig;

use crate::error::ScheduleResult;
use crate::occurrence::ScheduledOccurrence;
use crate::recurrence::{RecurrenceSpec, expand};

/// Whether generated occurrences are persisted or only staged for preview.
/// The expansion itself is identical in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Commit,
    Preview,
}

/// The external persistence collaborator. `persist` creates a durable
/// record; `stage` builds an unpersisted record of the same shape.
pub trait OccurrenceSink {
    type Record;

    /// ## Errors
    /// Returns an error if the record cannot be persisted.
    fn persist(&mut self, start: NaiveDateTime, finish: NaiveDateTime)
    -> anyhow::Result<Self::Record>;

    fn stage(&self, start: NaiveDateTime, finish: NaiveDateTime) -> Self::Record;
}

/// ## Summary
/// Expands `spec` and materializes every pair through `sink`. The expansion
/// runs to completion before the first side effect, so a fatal expansion
/// error (including the generation cap) yields zero persisted or staged
/// records.
///
/// ## Errors
///
/// Returns an error if the expansion fails (see [`expand`]) or the sink
/// rejects a record in commit mode.
pub fn add_occurrences<S: OccurrenceSink>(
    sink: &mut S,
    spec: &RecurrenceSpec,
    start: NaiveDateTime,
    finish: NaiveDateTime,
    mode: CommitMode,
    cfg: &RecurrenceConfig,
) -> ScheduleResult<Vec<S::Record>> {
    let pairs = expand(spec, start, finish, cfg)?;

    let mut records = Vec::with_capacity(pairs.len());
    for (occurrence_start, occurrence_finish) in pairs {
        let record = match mode {
            CommitMode::Commit => sink.persist(occurrence_start, occurrence_finish)?,
            CommitMode::Preview => sink.stage(occurrence_start, occurrence_finish),
        };
        records.push(record);
    }
    tracing::debug!(count = records.len(), ?mode, "scheduled occurrences");
    Ok(records)
}

/// In-process reference sink; commits append to a vector and receive a v4
/// UUID.
#[derive(Debug, Default)]
pub struct MemorySink {
    committed: Vec<ScheduledOccurrence>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn committed(&self) -> &[ScheduledOccurrence] {
        &self.committed
    }
}

impl OccurrenceSink for MemorySink {
    type Record = ScheduledOccurrence;

    fn persist(
        &mut self,
        start: NaiveDateTime,
        finish: NaiveDateTime,
    ) -> anyhow::Result<ScheduledOccurrence> {
        let record = ScheduledOccurrence {
            id: Some(Uuid::new_v4()),
            start,
            finish,
        };
        self.committed.push(record.clone());
        Ok(record)
    }

    fn stage(&self, start: NaiveDateTime, finish: NaiveDateTime) -> ScheduledOccurrence {
        ScheduledOccurrence::new(start, finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .expect("valid date")
            .and_hms_opt(h, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn test_commit_assigns_ids_and_records() {
        let mut sink = MemorySink::new();
        let spec = RecurrenceSpec::daily().with_count(3);
        let records = add_occurrences(
            &mut sink,
            &spec,
            dt(1, 10),
            dt(1, 11),
            CommitMode::Commit,
            &RecurrenceConfig::default(),
        )
        .expect("schedules");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(ScheduledOccurrence::is_persisted));
        assert_eq!(sink.committed().len(), 3);
    }

    #[test]
    fn test_preview_stages_without_side_effects() {
        let mut sink = MemorySink::new();
        let spec = RecurrenceSpec::daily().with_count(3);
        let records = add_occurrences(
            &mut sink,
            &spec,
            dt(1, 10),
            dt(1, 11),
            CommitMode::Preview,
            &RecurrenceConfig::default(),
        )
        .expect("schedules");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|record| record.id.is_none()));
        assert!(sink.committed().is_empty());
    }

    #[test]
    fn test_cap_breach_commits_nothing() {
        let mut sink = MemorySink::new();
        let spec = RecurrenceSpec::daily().with_count(50);
        let tight = RecurrenceConfig { max_occurrences: 10 };
        let result = add_occurrences(
            &mut sink,
            &spec,
            dt(1, 10),
            dt(1, 11),
            CommitMode::Commit,
            &tight,
        );
        assert!(result.is_err());
        assert!(sink.committed().is_empty());
    }
}
