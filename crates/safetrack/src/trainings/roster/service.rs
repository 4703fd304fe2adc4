use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::repository::EmployeeDirectory;
use crate::clock::Clock;
use crate::trainings::dashboard::{statistics, worst_status, Statistics};
use crate::trainings::directory::filter_and_sort;
use crate::trainings::domain::{Employee, EmployeeId, StatusFilter, TrainingStatus, WorstStatus};
use crate::trainings::status::classify;
use crate::trainings::store::StoreError;

/// Per-training view with its freshly computed lifecycle snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingView {
    pub id: crate::trainings::domain::TrainingId,
    pub name: String,
    pub completion_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub status: TrainingStatus,
    pub status_label: String,
    pub days_remaining: i64,
}

/// Per-employee view for the dashboard cards.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub worst_status: WorstStatus,
    pub worst_status_label: &'static str,
    pub trainings: Vec<TrainingView>,
}

/// Dashboard payload: fleet statistics plus the filtered, sorted roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterOverview {
    pub today: NaiveDate,
    pub statistics: Statistics,
    pub employees: Vec<EmployeeView>,
}

/// Roster operations over the persistence collaborator. Read paths degrade
/// to an empty roster when storage is unavailable; writes propagate errors.
pub struct RosterService<R, C> {
    directory: Arc<R>,
    clock: C,
}

impl<R, C> RosterService<R, C>
where
    R: EmployeeDirectory,
    C: Clock,
{
    pub fn new(directory: Arc<R>, clock: C) -> Self {
        Self { directory, clock }
    }

    /// Wholesale upsert of a batch of employees; each record replaces any
    /// stored one with the same id, training list included. Returns the
    /// number of employees written.
    pub fn sync(&self, employees: Vec<Employee>) -> Result<usize, StoreError> {
        let count = employees.len();
        for employee in employees {
            self.directory.upsert_employee(employee)?;
        }
        Ok(count)
    }

    /// Filtered, sorted dashboard view. `today` may be pinned by the caller
    /// (reporting against a specific day); otherwise it comes from the clock.
    pub fn overview(
        &self,
        filter: StatusFilter,
        search: &str,
        role: Option<&str>,
        today: Option<NaiveDate>,
    ) -> RosterOverview {
        let employees = match self.directory.list_employees() {
            Ok(employees) => employees,
            Err(err) => {
                warn!(error = %err, "employee directory unavailable, returning empty roster");
                Vec::new()
            }
        };

        let today = today.unwrap_or_else(|| self.clock.today());
        let stats = statistics(&employees, today);
        let views = filter_and_sort(&employees, filter, search, role, today)
            .into_iter()
            .map(|employee| employee_view(employee, today))
            .collect();

        RosterOverview {
            today,
            statistics: stats,
            employees: views,
        }
    }

    pub fn delete(&self, id: &EmployeeId) -> Result<(), StoreError> {
        self.directory.delete_employee(id)
    }
}

fn employee_view(employee: &Employee, today: NaiveDate) -> EmployeeView {
    let worst = worst_status(employee, today);
    EmployeeView {
        id: employee.id.clone(),
        name: employee.name.clone(),
        role: employee.role.clone(),
        worst_status: worst,
        worst_status_label: worst.label(),
        trainings: employee
            .trainings
            .iter()
            .map(|training| {
                let snapshot = classify(training.expiration_date, today);
                TrainingView {
                    id: training.id.clone(),
                    name: training.name.clone(),
                    completion_date: training.completion_date,
                    expiration_date: training.expiration_date,
                    status: snapshot.status,
                    status_label: snapshot.label,
                    days_remaining: snapshot.diff_days,
                }
            })
            .collect(),
    }
}
