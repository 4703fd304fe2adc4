use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use safetrack::trainings::alerts::{
    AlertDispatcher, AlertStore, EmailHistoryEntry, NotificationRecord, TrainingWithEmployee,
};
use safetrack::trainings::domain::{Employee, EmployeeId, TrainingId};
use safetrack::trainings::roster::EmployeeDirectory;
use safetrack::trainings::store::StoreError;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Single in-memory backing store for both the roster and the alert dedup
/// records. Insertion order of employees is preserved so list output is
/// stable before the display sort is applied.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTrainingStore {
    employees: Arc<Mutex<Vec<Employee>>>,
    notifications: Arc<Mutex<HashMap<TrainingId, NotificationRecord>>>,
}

impl EmployeeDirectory for InMemoryTrainingStore {
    fn upsert_employee(&self, employee: Employee) -> Result<(), StoreError> {
        let mut guard = self.employees.lock().expect("employee mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == employee.id) {
            Some(existing) => *existing = employee,
            None => guard.push(employee),
        }
        Ok(())
    }

    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let guard = self.employees.lock().expect("employee mutex poisoned");
        Ok(guard.clone())
    }

    fn delete_employee(&self, id: &EmployeeId) -> Result<(), StoreError> {
        let mut guard = self.employees.lock().expect("employee mutex poisoned");
        let before = guard.len();
        guard.retain(|employee| &employee.id != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl AlertStore for InMemoryTrainingStore {
    fn trainings_with_employees(&self) -> Result<Vec<TrainingWithEmployee>, StoreError> {
        let guard = self.employees.lock().expect("employee mutex poisoned");
        let mut rows = Vec::new();
        for employee in guard.iter() {
            for training in &employee.trainings {
                rows.push(TrainingWithEmployee {
                    training_id: training.id.clone(),
                    employee_id: employee.id.clone(),
                    training_name: Some(training.name.clone()),
                    expiration_date: training.expiration_date,
                    employee_name: if employee.name.trim().is_empty() {
                        None
                    } else {
                        Some(employee.name.clone())
                    },
                });
            }
        }
        Ok(rows)
    }

    fn notification_record(
        &self,
        training_id: &TrainingId,
    ) -> Result<Option<NotificationRecord>, StoreError> {
        let guard = self.notifications.lock().expect("notification mutex poisoned");
        Ok(guard.get(training_id).cloned())
    }

    fn upsert_notification_record(
        &self,
        training_id: &TrainingId,
        employee_id: &EmployeeId,
        sent_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut guard = self.notifications.lock().expect("notification mutex poisoned");
        guard.insert(
            training_id.clone(),
            NotificationRecord {
                training_id: training_id.clone(),
                employee_id: employee_id.clone(),
                last_sent_at: sent_at,
            },
        );
        Ok(())
    }

    fn email_history(&self) -> Result<Vec<EmailHistoryEntry>, StoreError> {
        let employees = self.employees.lock().expect("employee mutex poisoned");
        let notifications = self.notifications.lock().expect("notification mutex poisoned");

        let entries = notifications
            .values()
            .map(|record| {
                let employee = employees.iter().find(|e| e.id == record.employee_id);
                let training = employee.and_then(|e| {
                    e.trainings.iter().find(|t| t.id == record.training_id)
                });
                EmailHistoryEntry {
                    training_id: record.training_id.clone(),
                    employee_id: record.employee_id.clone(),
                    last_sent_at: record.last_sent_at,
                    training_name: training.map(|t| t.name.clone()),
                    employee_name: employee.map(|e| e.name.clone()),
                    expiration_date: training.and_then(|t| t.expiration_date),
                }
            })
            .collect();

        Ok(entries)
    }
}

/// Transport placeholder until an SMTP/webhook adapter is configured: logs
/// the digest and reports success so the dedup records still advance.
#[derive(Default, Clone)]
pub(crate) struct LoggingAlertDispatcher;

impl AlertDispatcher for LoggingAlertDispatcher {
    fn send(&self, title: &str, html_body: &str) -> bool {
        info!(%title, body_bytes = html_body.len(), "training alert digest ready");
        true
    }
}
