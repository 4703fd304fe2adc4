use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::trainings::domain::{Employee, EmployeeId, TrainingId, TrainingRecord};

/// Error raised while parsing a roster export.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("unable to read roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unparseable date '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Parse a bulk roster export: one CSV row per training, grouped into
/// employees by name (first-seen order preserved). Blank dates are
/// tolerated and surface later as `Unknown` status; malformed ones are
/// rejected so a bad import never silently drops expirations.
pub fn import_roster<R: Read>(reader: R) -> Result<Vec<Employee>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut employees: Vec<Employee> = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        let row_number = index + 2; // header occupies line 1

        let completion_date = parse_optional_date(row.completed_on.as_deref(), row_number)?;
        let expiration_date = parse_optional_date(row.expires_on.as_deref(), row_number)?;

        let employee_id = EmployeeId(format!("emp-{}", slugify(&row.name)));
        let position = match employees.iter().position(|e| e.id == employee_id) {
            Some(position) => position,
            None => {
                employees.push(Employee {
                    id: employee_id,
                    name: row.name.clone(),
                    role: row.role.clone().unwrap_or_default(),
                    trainings: Vec::new(),
                });
                employees.len() - 1
            }
        };
        let employee = &mut employees[position];

        let training_index = employee.trainings.len() + 1;
        employee.trainings.push(TrainingRecord {
            id: TrainingId(format!(
                "{}-{}-{training_index}",
                employee.id.0,
                slugify(&row.training)
            )),
            name: row.training,
            completion_date,
            expiration_date,
        });
    }

    Ok(employees)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Role", default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(rename = "Training")]
    training: String,
    #[serde(
        rename = "Completed On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_on: Option<String>,
    #[serde(
        rename = "Expires On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    expires_on: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_optional_date(
    value: Option<&str>,
    row: usize,
) -> Result<Option<NaiveDate>, RosterImportError> {
    let Some(raw) = value else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| RosterImportError::InvalidDate {
            row,
            value: raw.to_string(),
        })
}

fn slugify(value: &str) -> String {
    let mut slug: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug.trim_matches('-').to_string()
}
