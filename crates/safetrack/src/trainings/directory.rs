use chrono::NaiveDate;

use super::collation::compare_names;
use super::domain::{Employee, StatusFilter};
use super::status::classify;

/// Filter the roster by search text, lifecycle status, and role, then sort
/// it for display.
///
/// Employees with no trainings pass `StatusFilter::All` but are excluded by
/// every other status filter, since they have no record to match.
pub fn filter_and_sort<'a>(
    employees: &'a [Employee],
    filter: StatusFilter,
    search: &str,
    role: Option<&str>,
    today: NaiveDate,
) -> Vec<&'a Employee> {
    let query = search.trim().to_lowercase();

    let mut result: Vec<&Employee> = employees
        .iter()
        .filter(|employee| query.is_empty() || employee.name.to_lowercase().contains(&query))
        .filter(|employee| match filter {
            StatusFilter::All => true,
            _ => employee
                .trainings
                .iter()
                .any(|training| filter.matches(classify(training.expiration_date, today).status)),
        })
        .filter(|employee| role.map_or(true, |role| employee.role == role))
        .collect();

    result.sort_by(|a, b| compare_names(&a.name, &b.name));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainings::domain::{EmployeeId, TrainingId, TrainingRecord};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
    }

    fn employee(name: &str, role: &str, expirations: &[i64]) -> Employee {
        Employee {
            id: EmployeeId(name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            role: role.to_string(),
            trainings: expirations
                .iter()
                .enumerate()
                .map(|(index, days)| TrainingRecord {
                    id: TrainingId(format!("{name}-{index}")),
                    name: "NR-35".to_string(),
                    completion_date: None,
                    expiration_date: Some(today() + Duration::days(*days)),
                })
                .collect(),
        }
    }

    fn names(employees: &[&Employee]) -> Vec<String> {
        employees.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn sorts_by_first_name_then_full_name() {
        let roster = vec![
            employee("Carlos Mendes", "", &[60]),
            employee("Ana Paula", "", &[60]),
            employee("Carlos Alberto", "", &[60]),
        ];

        let sorted = filter_and_sort(&roster, StatusFilter::All, "", None, today());
        assert_eq!(names(&sorted), vec!["Ana Paula", "Carlos Alberto", "Carlos Mendes"]);
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let roster = vec![
            employee("Ana Paula", "", &[60]),
            employee("Mariana Costa", "", &[60]),
            employee("Carlos Alberto", "", &[60]),
        ];

        let matched = filter_and_sort(&roster, StatusFilter::All, "ANA", None, today());
        assert_eq!(names(&matched), vec!["Ana Paula", "Mariana Costa"]);
    }

    #[test]
    fn whitespace_only_search_matches_everyone() {
        let roster = vec![employee("Ana Paula", "", &[60])];
        let matched = filter_and_sort(&roster, StatusFilter::All, "   ", None, today());
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn status_filter_requires_at_least_one_matching_training() {
        let roster = vec![
            employee("Ana Paula", "", &[60, -2]),
            employee("Carlos Alberto", "", &[60]),
        ];

        let expired = filter_and_sort(&roster, StatusFilter::Expired, "", None, today());
        assert_eq!(names(&expired), vec!["Ana Paula"]);
    }

    #[test]
    fn employees_without_trainings_are_excluded_by_status_filters() {
        let roster = vec![employee("Ana Paula", "", &[])];

        let expired = filter_and_sort(&roster, StatusFilter::Expired, "", None, today());
        assert!(expired.is_empty());

        let all = filter_and_sort(&roster, StatusFilter::All, "", None, today());
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn role_filter_is_exact_match() {
        let roster = vec![
            employee("Ana Paula", "Soldador industrial", &[60]),
            employee("Carlos Alberto", "Soldador", &[60]),
        ];

        let matched = filter_and_sort(&roster, StatusFilter::All, "", Some("Soldador"), today());
        assert_eq!(names(&matched), vec!["Carlos Alberto"]);
    }
}
