//! End-to-end scenarios for the expiration alert pipeline: candidate
//! selection, the rolling dedup window, dispatch failure handling, and the
//! audit history, driven through the public service facade with injected
//! storage, transport, and clock.

mod common {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, NaiveDate, Utc};

    use safetrack::clock::Clock;
    use safetrack::trainings::alerts::{
        AlertDispatcher, AlertService, AlertStore, EmailHistoryEntry, NotificationRecord,
        TrainingWithEmployee,
    };
    use safetrack::trainings::domain::{EmployeeId, TrainingId};
    use safetrack::trainings::store::StoreError;

    pub(super) fn base_instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-15T08:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[derive(Clone)]
    pub(super) struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub(super) fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub(super) fn advance_hours(&self, hours: i64) {
            let mut guard = self.now.lock().expect("clock lock");
            *guard += Duration::hours(hours);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryAlertStore {
        rows: Mutex<Vec<TrainingWithEmployee>>,
        notifications: Mutex<HashMap<TrainingId, NotificationRecord>>,
        unavailable: AtomicBool,
    }

    impl MemoryAlertStore {
        pub(super) fn push_row(&self, row: TrainingWithEmployee) {
            self.rows.lock().expect("lock").push(row);
        }

        pub(super) fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub(super) fn notification_count(&self) -> usize {
            self.notifications.lock().expect("lock").len()
        }
    }

    impl AlertStore for MemoryAlertStore {
        fn trainings_with_employees(&self) -> Result<Vec<TrainingWithEmployee>, StoreError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("database offline".to_string()));
            }
            Ok(self.rows.lock().expect("lock").clone())
        }

        fn notification_record(
            &self,
            training_id: &TrainingId,
        ) -> Result<Option<NotificationRecord>, StoreError> {
            Ok(self
                .notifications
                .lock()
                .expect("lock")
                .get(training_id)
                .cloned())
        }

        fn upsert_notification_record(
            &self,
            training_id: &TrainingId,
            employee_id: &EmployeeId,
            sent_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            self.notifications.lock().expect("lock").insert(
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
            Ok(self
                .notifications
                .lock()
                .expect("lock")
                .values()
                .map(|record| EmailHistoryEntry {
                    training_id: record.training_id.clone(),
                    employee_id: record.employee_id.clone(),
                    last_sent_at: record.last_sent_at,
                    training_name: None,
                    employee_name: None,
                    expiration_date: None,
                })
                .collect())
        }
    }

    #[derive(Default)]
    pub(super) struct RecordingDispatcher {
        sent: Mutex<Vec<(String, String)>>,
        fail: AtomicBool,
    }

    impl RecordingDispatcher {
        pub(super) fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }

        pub(super) fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl AlertDispatcher for RecordingDispatcher {
        fn send(&self, title: &str, html_body: &str) -> bool {
            if self.fail.load(Ordering::SeqCst) {
                return false;
            }
            self.sent
                .lock()
                .expect("lock")
                .push((title.to_string(), html_body.to_string()));
            true
        }
    }

    pub(super) fn row(
        training_id: &str,
        employee_name: Option<&str>,
        expires_in_days: Option<i64>,
        today: NaiveDate,
    ) -> TrainingWithEmployee {
        TrainingWithEmployee {
            training_id: TrainingId(training_id.to_string()),
            employee_id: EmployeeId(format!("emp-{training_id}")),
            training_name: Some(format!("Treinamento {training_id}")),
            expiration_date: expires_in_days.map(|days| today + Duration::days(days)),
            employee_name: employee_name.map(str::to_string),
        }
    }

    pub(super) fn build_service() -> (
        AlertService<MemoryAlertStore, RecordingDispatcher, ManualClock>,
        Arc<MemoryAlertStore>,
        Arc<RecordingDispatcher>,
        ManualClock,
    ) {
        let store = Arc::new(MemoryAlertStore::default());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let clock = ManualClock::at(base_instant());
        let service = AlertService::new(store.clone(), dispatcher.clone(), clock.clone());
        (service, store, dispatcher, clock)
    }
}

mod selection {
    use super::common::*;
    use safetrack::trainings::alerts::AlertStatus;

    #[test]
    fn training_expiring_in_ten_days_is_a_candidate() {
        let (service, store, _, clock) = build_service();
        use safetrack::clock::Clock;
        let today = clock.today();
        store.push_row(row("nr35", Some("Ana Paula"), Some(10), today));

        let alerts = service.alerts_to_send();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, AlertStatus::ExpiringSoon);
        assert_eq!(alerts[0].days_remaining, 10);
        assert_eq!(alerts[0].employee_name, "Ana Paula");
    }

    #[test]
    fn training_expired_five_days_ago_reports_negative_days() {
        let (service, store, _, clock) = build_service();
        use safetrack::clock::Clock;
        let today = clock.today();
        store.push_row(row("sep", Some("Carlos Alberto"), Some(-5), today));

        let alerts = service.alerts_to_send();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, AlertStatus::Expired);
        assert_eq!(alerts[0].days_remaining, -5);
    }

    #[test]
    fn thirty_day_boundary_is_inclusive_and_thirty_one_is_not() {
        let (service, store, _, clock) = build_service();
        use safetrack::clock::Clock;
        let today = clock.today();
        store.push_row(row("at-30", Some("Ana Paula"), Some(30), today));
        store.push_row(row("at-31", Some("Ana Paula"), Some(31), today));

        let alerts = service.alerts_to_send();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].training_id.0, "at-30");
        assert_eq!(alerts[0].days_remaining, 30);
    }

    #[test]
    fn rows_without_expiration_or_owner_name_are_skipped() {
        let (service, store, _, clock) = build_service();
        use safetrack::clock::Clock;
        let today = clock.today();
        store.push_row(row("undated", Some("Ana Paula"), None, today));
        store.push_row(row("orphan", None, Some(5), today));

        assert!(service.alerts_to_send().is_empty());
    }

    #[test]
    fn unavailable_store_degrades_to_no_alerts() {
        let (service, store, dispatcher, clock) = build_service();
        use safetrack::clock::Clock;
        let today = clock.today();
        store.push_row(row("nr35", Some("Ana Paula"), Some(10), today));
        store.set_unavailable(true);

        assert!(service.alerts_to_send().is_empty());
        // Dispatch is a trivial success: nothing to send, nothing recorded.
        assert!(service.dispatch_pending());
        assert!(dispatcher.sent().is_empty());
        assert_eq!(store.notification_count(), 0);
    }
}

mod dedup_window {
    use super::common::*;
    use safetrack::clock::Clock;

    #[test]
    fn dispatched_alert_is_suppressed_for_a_rolling_day_then_reappears() {
        let (service, store, dispatcher, clock) = build_service();
        let today = clock.today();
        store.push_row(row("nr35", Some("Ana Paula"), Some(10), today));

        assert!(service.dispatch_pending());
        assert_eq!(dispatcher.sent().len(), 1);
        assert_eq!(store.notification_count(), 1);

        // Still inside the 24-hour window: no candidates, trivial success.
        clock.advance_hours(23);
        assert!(service.alerts_to_send().is_empty());
        assert!(service.dispatch_pending());
        assert_eq!(dispatcher.sent().len(), 1);

        // 25 hours after the send the training is eligible again.
        clock.advance_hours(2);
        let alerts = service.alerts_to_send();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_remaining, 9);

        // The repeat send overwrites the dedup record instead of appending.
        assert!(service.dispatch_pending());
        assert_eq!(dispatcher.sent().len(), 2);
        assert_eq!(store.notification_count(), 1);
    }

    #[test]
    fn failed_dispatch_leaves_the_batch_eligible() {
        let (service, store, dispatcher, clock) = build_service();
        let today = clock.today();
        store.push_row(row("nr35", Some("Ana Paula"), Some(10), today));
        dispatcher.set_failing(true);

        assert!(!service.dispatch_pending());
        assert_eq!(store.notification_count(), 0);
        assert_eq!(service.alerts_to_send().len(), 1);

        // Transport recovers: the same alert goes out on the next run.
        dispatcher.set_failing(false);
        assert!(service.dispatch_pending());
        assert_eq!(dispatcher.sent().len(), 1);
        assert_eq!(store.notification_count(), 1);
    }

    #[test]
    fn selection_is_deterministic_within_a_tick() {
        let (service, store, _, clock) = build_service();
        let today = clock.today();
        store.push_row(row("nr35", Some("Ana Paula"), Some(10), today));
        store.push_row(row("sep", Some("Carlos Alberto"), Some(-2), today));

        assert_eq!(service.alerts_to_send(), service.alerts_to_send());
    }
}

mod digest {
    use super::common::*;
    use safetrack::clock::Clock;

    #[test]
    fn digest_lists_expired_before_expiring_and_counts_all() {
        let (service, store, dispatcher, clock) = build_service();
        let today = clock.today();
        store.push_row(row("altura", Some("Ana Paula"), Some(10), today));
        store.push_row(row("sep", Some("Carlos Alberto"), Some(-5), today));

        assert!(service.dispatch_pending());

        let sent = dispatcher.sent();
        assert_eq!(sent.len(), 1);
        let (title, body) = &sent[0];
        assert_eq!(title, "Relatório de Treinamentos - 2 alertas");

        let expired_at = body.find("Treinamentos Vencidos").expect("expired heading");
        let expiring_at = body.find("Treinamentos a Vencer").expect("expiring heading");
        assert!(expired_at < expiring_at);
        assert!(body.contains("Carlos Alberto"));
        assert!(body.contains("Vencido há 5 dias"));
        assert!(body.contains("Vence em 10 dias"));
    }
}

mod history {
    use super::common::*;
    use safetrack::clock::Clock;

    #[test]
    fn history_is_ordered_most_recent_first() {
        let (service, store, _, clock) = build_service();
        let today = clock.today();
        store.push_row(row("altura", Some("Ana Paula"), Some(10), today));

        assert!(service.dispatch_pending());

        clock.advance_hours(30);
        let later_today = clock.today();
        store.push_row(row("sep", Some("Carlos Alberto"), Some(3), later_today));

        assert!(service.dispatch_pending());

        let history = service.email_history();
        assert_eq!(history.len(), 2);
        assert!(history[0].last_sent_at >= history[1].last_sent_at);
        assert_eq!(history[0].training_id.0, "sep");
    }
}
