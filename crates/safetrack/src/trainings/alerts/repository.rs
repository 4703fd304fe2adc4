use chrono::{DateTime, Utc};

use super::domain::{EmailHistoryEntry, NotificationRecord, TrainingWithEmployee};
use crate::trainings::domain::{EmployeeId, TrainingId};
use crate::trainings::store::StoreError;

/// Storage abstraction the alert pipeline depends on. Implementations must
/// honor upsert-by-training-id semantics for notification records so at most
/// one dedup record exists per training at any time.
pub trait AlertStore: Send + Sync {
    /// Every training joined with its owning employee's name.
    fn trainings_with_employees(&self) -> Result<Vec<TrainingWithEmployee>, StoreError>;

    /// Dedup record for one training, if an alert was ever sent for it.
    fn notification_record(
        &self,
        training_id: &TrainingId,
    ) -> Result<Option<NotificationRecord>, StoreError>;

    /// Insert or overwrite the dedup record for a training, stamping it with
    /// the given send time.
    fn upsert_notification_record(
        &self,
        training_id: &TrainingId,
        employee_id: &EmployeeId,
        sent_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Notification records joined with training/employee context for the
    /// audit panel. Ordering is left to the caller.
    fn email_history(&self) -> Result<Vec<EmailHistoryEntry>, StoreError>;
}
