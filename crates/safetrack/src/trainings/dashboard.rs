use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Employee, TrainingStatus, WorstStatus};
use super::status::classify;

/// Fleet-wide training counts for the dashboard stat cards.
///
/// `total` counts every record, including those with an unreadable
/// expiration date; the three named buckets exclude them, so
/// `valid + expiring + expired <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub valid: usize,
    pub expiring: usize,
    pub expired: usize,
}

/// Classify every training of every employee and tally the buckets.
pub fn statistics(employees: &[Employee], today: NaiveDate) -> Statistics {
    let mut stats = Statistics::default();

    for employee in employees {
        for training in &employee.trainings {
            stats.total += 1;
            match classify(training.expiration_date, today).status {
                TrainingStatus::Expired => stats.expired += 1,
                TrainingStatus::Expiring => stats.expiring += 1,
                TrainingStatus::Valid => stats.valid += 1,
                TrainingStatus::Unknown => {}
            }
        }
    }

    stats
}

/// Most severe status among an employee's trainings. Unknown records never
/// elevate the result; an employee with no trainings reports `None`.
pub fn worst_status(employee: &Employee, today: NaiveDate) -> WorstStatus {
    if employee.trainings.is_empty() {
        return WorstStatus::None;
    }

    let mut has_expired = false;
    let mut has_expiring = false;

    for training in &employee.trainings {
        match classify(training.expiration_date, today).status {
            TrainingStatus::Expired => has_expired = true,
            TrainingStatus::Expiring => has_expiring = true,
            TrainingStatus::Valid | TrainingStatus::Unknown => {}
        }
    }

    if has_expired {
        WorstStatus::Expired
    } else if has_expiring {
        WorstStatus::Expiring
    } else {
        WorstStatus::Valid
    }
}
