use chrono::NaiveDate;
use serde::Serialize;

use super::domain::TrainingStatus;

/// Trainings expiring within this many days (inclusive, counting day zero)
/// are reported as "expiring" and become alert candidates.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Result of classifying one expiration date against a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub status: TrainingStatus,
    pub diff_days: i64,
    pub label: String,
}

/// Classify a training's lifecycle from its expiration date.
///
/// Both sides are calendar days, so the comparison is day-granular and
/// independent of wall-clock time. A missing expiration date yields
/// `Unknown` with `diff_days = 0` rather than an error.
pub fn classify(expiration: Option<NaiveDate>, today: NaiveDate) -> StatusSnapshot {
    let Some(expiration) = expiration else {
        return StatusSnapshot {
            status: TrainingStatus::Unknown,
            diff_days: 0,
            label: "Data não definida".to_string(),
        };
    };

    let diff_days = (expiration - today).num_days();

    if diff_days < 0 {
        let overdue = -diff_days;
        StatusSnapshot {
            status: TrainingStatus::Expired,
            diff_days,
            label: format!("Vencido há {} dia{}", overdue, plural(overdue)),
        }
    } else if diff_days <= EXPIRING_WINDOW_DAYS {
        StatusSnapshot {
            status: TrainingStatus::Expiring,
            diff_days,
            label: format!("Vence em {} dia{}", diff_days, plural(diff_days)),
        }
    } else {
        StatusSnapshot {
            status: TrainingStatus::Valid,
            diff_days,
            label: format!("Válido por {} dias", diff_days),
        }
    }
}

fn plural(days: i64) -> &'static str {
    if days == 1 {
        ""
    } else {
        "s"
    }
}
