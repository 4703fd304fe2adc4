pub mod alerts;
pub mod dashboard;
pub mod directory;
pub mod domain;
pub mod roster;
pub mod status;
pub mod store;

mod collation;

pub use dashboard::{statistics, worst_status, Statistics};
pub use directory::filter_and_sort;
pub use domain::{Employee, EmployeeId, StatusFilter, TrainingId, TrainingRecord, TrainingStatus, WorstStatus};
pub use status::{classify, StatusSnapshot, EXPIRING_WINDOW_DAYS};
