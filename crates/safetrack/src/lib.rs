//! Safetrack tracks employee safety-training records, classifies their
//! expiration lifecycle, and dispatches consolidated renewal alerts on a
//! recurring schedule.

pub mod clock;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod trainings;
