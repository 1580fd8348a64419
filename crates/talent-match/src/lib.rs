//! Skill ledger aggregation and candidate matching for the talent platform.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
