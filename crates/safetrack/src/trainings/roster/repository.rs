use crate::trainings::domain::{Employee, EmployeeId};
use crate::trainings::store::StoreError;

/// Storage abstraction for the employee roster. Saves are wholesale: an
/// upsert replaces the entire employee record, training list included.
pub trait EmployeeDirectory: Send + Sync {
    fn upsert_employee(&self, employee: Employee) -> Result<(), StoreError>;
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
    fn delete_employee(&self, id: &EmployeeId) -> Result<(), StoreError>;
}
