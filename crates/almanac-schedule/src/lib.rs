//! Recurrence expansion and occurrence scheduling: turns one user-submitted
//! recurrence specification into a bounded batch of concrete occurrence
//! records, either persisted through a sink or staged for preview.

pub mod error;
pub mod occurrence;
pub mod recurrence;
pub mod sink;
