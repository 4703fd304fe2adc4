use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::trainings::domain::{EmployeeId, TrainingId};

/// Alert-side status. Deliberately narrower than the display status: records
/// outside the 30-day horizon are never candidates, so there is no "valid"
/// or "unknown" bucket here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Expired,
    ExpiringSoon,
}

impl AlertStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Vencido",
            Self::ExpiringSoon => "A vencer",
        }
    }
}

/// One training that needs notification on this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingAlert {
    pub employee_name: String,
    pub training_name: String,
    pub days_remaining: i64,
    pub expiration_date: NaiveDate,
    pub status: AlertStatus,
    pub training_id: TrainingId,
    pub employee_id: EmployeeId,
}

/// Persisted dedup state: at most one live record per training id, with the
/// timestamp overwritten (not appended) on every repeat alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub training_id: TrainingId,
    pub employee_id: EmployeeId,
    pub last_sent_at: DateTime<Utc>,
}

/// Training row joined with its owning employee's name, as produced by the
/// persistence collaborator. Optional fields reflect the left join: an
/// orphaned training has no employee name and cannot be alerted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingWithEmployee {
    pub training_id: TrainingId,
    pub employee_id: EmployeeId,
    pub training_name: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub employee_name: Option<String>,
}

/// Sent-alert audit entry surfaced by the email history panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailHistoryEntry {
    pub training_id: TrainingId,
    pub employee_id: EmployeeId,
    pub last_sent_at: DateTime<Utc>,
    pub training_name: Option<String>,
    pub employee_name: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}
