use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for training records. Unique within an employee;
/// global uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingId(pub String);

/// A completed safety training and the date its certificate expires.
/// The expiration date alone drives the lifecycle status; the completion
/// date is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: TrainingId,
    pub name: String,
    pub completion_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

/// Employee roster entry. Saved wholesale: every sync replaces the record
/// including its training list, there is no field-level update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub trainings: Vec<TrainingRecord>,
}

/// Display lifecycle of a training record relative to today. Derived on
/// every read, never persisted, so it tracks the calendar automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Expired,
    Expiring,
    Valid,
    Unknown,
}

impl TrainingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Vencido",
            Self::Expiring => "A vencer",
            Self::Valid => "Válido",
            Self::Unknown => "Indefinido",
        }
    }
}

/// Dashboard status filter. `All` passes every employee through; any other
/// value keeps only employees with at least one training of that status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Valid,
    Expiring,
    Expired,
}

impl StatusFilter {
    pub(crate) fn matches(self, status: TrainingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Valid => status == TrainingStatus::Valid,
            Self::Expiring => status == TrainingStatus::Expiring,
            Self::Expired => status == TrainingStatus::Expired,
        }
    }
}

/// Most severe lifecycle status among an employee's trainings, under the
/// fixed priority expired > expiring > valid. `None` means no trainings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorstStatus {
    Expired,
    Expiring,
    Valid,
    None,
}

impl WorstStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Vencido",
            Self::Expiring => "A vencer",
            Self::Valid => "Em dia",
            Self::None => "Sem treinamentos",
        }
    }
}
