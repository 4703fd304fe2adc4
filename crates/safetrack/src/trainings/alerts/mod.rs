//! Expiration alerting: scans every training joined with its owner, selects
//! the ones inside the 30-day horizon, renders one consolidated email digest,
//! and records each send so the same training is not alerted twice within a
//! rolling 24-hour window.

pub mod dispatcher;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scheduler;
pub mod service;

mod message;

pub use dispatcher::AlertDispatcher;
pub use domain::{AlertStatus, EmailHistoryEntry, NotificationRecord, TrainingAlert, TrainingWithEmployee};
pub use repository::AlertStore;
pub use router::alert_router;
pub use scheduler::AlertScheduler;
pub use service::{AlertService, DEDUP_WINDOW_HOURS};
