//! Calendar period machinery: canonically aligned time spans at hour through
//! year granularity, occurrence association, locale-aware week boundaries,
//! and the timezone localization proxy for occurrence-like records.

pub mod error;
pub mod locale;
pub mod occurrence;
pub mod period;
