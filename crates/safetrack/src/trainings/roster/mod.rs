//! Employee roster: the persistence boundary, the wholesale sync/list/delete
//! service, the dashboard overview, and the CSV bulk-import path.

pub mod import;
pub mod repository;
pub mod router;
pub mod service;

pub use import::{import_roster, RosterImportError};
pub use repository::EmployeeDirectory;
pub use router::roster_router;
pub use service::{EmployeeView, RosterOverview, RosterService, TrainingView};
