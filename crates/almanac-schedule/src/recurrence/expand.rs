//! Bounded expansion of a recurrence specification into concrete
//! `(start, finish)` pairs, driven through the `rrule` crate.

use chrono::NaiveDateTime;
use rrule::RRuleSet;

use almanac_core::config::RecurrenceConfig;

use crate::error::{ScheduleError, ScheduleResult};

use super::RecurrenceSpec;

/// ## Summary
/// Expands `spec` into concrete occurrence pairs. Every generated start is
/// paired with `start + (finish − start)`, so each occurrence keeps the
/// original duration. Without a termination the result is exactly the
/// original pair and the rule engine is never consulted.
///
/// ## Errors
///
/// Returns an error if:
/// - the specification fails validation, or `finish` precedes `start`
/// - the rendered rule text is rejected by the rule engine
/// - the expansion exceeds `cfg.max_occurrences`; this is fatal and yields
///   no partial output, and also covers rules whose iterator is cut off
///   scanning for matches that rarely or never exist (such as the 31st of
///   September)
pub fn expand(
    spec: &RecurrenceSpec,
    start: NaiveDateTime,
    finish: NaiveDateTime,
    cfg: &RecurrenceConfig,
) -> ScheduleResult<Vec<(NaiveDateTime, NaiveDateTime)>> {
    spec.validate()?;
    if finish < start {
        return Err(ScheduleError::ValidationError(format!(
            "finish {finish} precedes start {start}"
        )));
    }

    if spec.termination.is_none() {
        tracing::trace!("no count or until, yielding the original pair");
        return Ok(vec![(start, finish)]);
    }

    let duration = finish - start;
    let rule_text = format!("DTSTART:{}\nRRULE:{spec}", start.format("%Y%m%dT%H%M%SZ"));
    tracing::trace!(rule = %rule_text, "expanding recurrence rule");

    let rrule_set = rule_text
        .parse::<RRuleSet>()
        .map_err(|err| ScheduleError::ValidationError(err.to_string()))?;

    let cap = cfg.max_occurrences;
    let limit = u16::try_from(cap.saturating_add(1)).unwrap_or(u16::MAX);
    let result = rrule_set.all(limit);
    if result.limited || result.dates.len() > cap {
        tracing::debug!(cap, produced = result.dates.len(), "expansion hit the generation cap");
        return Err(ScheduleError::TooManyOccurrences(cap));
    }

    let pairs: Vec<(NaiveDateTime, NaiveDateTime)> = result
        .dates
        .iter()
        .map(|instant| {
            let generated = instant.naive_utc();
            (generated, generated + duration)
        })
        .collect();
    tracing::trace!(count = pairs.len(), "expansion produced occurrence pairs");
    Ok(pairs)
}
