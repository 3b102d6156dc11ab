//! Foundation crate for the almanac workspace: configuration loading,
//! shared defaults, and the core error type. No calendar logic lives here.

pub mod config;
pub mod constants;
pub mod error;
