use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use super::dispatcher::AlertDispatcher;
use super::domain::{AlertStatus, EmailHistoryEntry, TrainingAlert};
use super::message::render_digest;
use super::repository::AlertStore;
use crate::clock::Clock;
use crate::trainings::status::EXPIRING_WINDOW_DAYS;

/// A training alerted once stays silenced for this many rolling hours,
/// measured from the recorded send time, not aligned to calendar days.
pub const DEDUP_WINDOW_HOURS: i64 = 24;

/// Scans the training roster, selects alert candidates, and dispatches one
/// consolidated digest per run. All storage and transport failures degrade
/// to "do nothing this cycle" so the recurring schedule never dies.
pub struct AlertService<S, D, C> {
    store: Arc<S>,
    dispatcher: Arc<D>,
    clock: C,
}

impl<S, D, C> AlertService<S, D, C>
where
    S: AlertStore,
    D: AlertDispatcher,
    C: Clock,
{
    pub fn new(store: Arc<S>, dispatcher: Arc<D>, clock: C) -> Self {
        Self {
            store,
            dispatcher,
            clock,
        }
    }

    /// Every training inside the alert horizon that is not silenced by its
    /// dedup record. Recomputed from scratch on each call so state never
    /// goes stale between ticks.
    pub fn alerts_to_send(&self) -> Vec<TrainingAlert> {
        let rows = match self.store.trainings_with_employees() {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "alert store unavailable, skipping scan");
                return Vec::new();
            }
        };

        let today = self.clock.today();
        let window_start = self.clock.now() - Duration::hours(DEDUP_WINDOW_HOURS);
        let mut alerts = Vec::new();

        for row in rows {
            // A training without an expiration date or an owner name cannot
            // be alerted meaningfully.
            let Some(expiration_date) = row.expiration_date else {
                continue;
            };
            let Some(employee_name) = row.employee_name else {
                continue;
            };

            let days_remaining = (expiration_date - today).num_days();
            if days_remaining > EXPIRING_WINDOW_DAYS {
                continue;
            }

            match self.store.notification_record(&row.training_id) {
                Ok(Some(record)) if record.last_sent_at >= window_start => continue,
                Ok(_) => {}
                // A failed dedup lookup counts as "not sent": better one
                // duplicate email than a silently dropped alert.
                Err(err) => {
                    warn!(error = %err, training_id = %row.training_id.0, "dedup lookup failed");
                }
            }

            alerts.push(TrainingAlert {
                employee_name,
                training_name: row
                    .training_name
                    .unwrap_or_else(|| "Treinamento sem nome".to_string()),
                days_remaining,
                expiration_date,
                status: if days_remaining < 0 {
                    AlertStatus::Expired
                } else {
                    AlertStatus::ExpiringSoon
                },
                training_id: row.training_id,
                employee_id: row.employee_id,
            });
        }

        alerts
    }

    /// One full alert run: select, render, dispatch, and on success stamp
    /// every alert's dedup record with the send time. An empty candidate
    /// list is a trivial success; a failed dispatch stamps nothing, so the
    /// same alerts are recomputed on the next tick.
    pub fn dispatch_pending(&self) -> bool {
        let alerts = self.alerts_to_send();
        if alerts.is_empty() {
            debug!("no training alerts to send");
            return true;
        }

        let (title, body) = render_digest(&alerts, self.clock.now());
        if !self.dispatcher.send(&title, &body) {
            warn!(count = alerts.len(), "alert dispatch failed, batch stays eligible for retry");
            return false;
        }

        let sent_at = self.clock.now();
        for alert in &alerts {
            if let Err(err) =
                self.store
                    .upsert_notification_record(&alert.training_id, &alert.employee_id, sent_at)
            {
                warn!(
                    error = %err,
                    training_id = %alert.training_id.0,
                    "failed to record sent alert; it may repeat next tick"
                );
            }
        }

        info!(count = alerts.len(), "dispatched training alert digest");
        true
    }

    /// Sent-alert audit trail, most recent first. Degrades to empty when
    /// storage is unavailable.
    pub fn email_history(&self) -> Vec<EmailHistoryEntry> {
        match self.store.email_history() {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.last_sent_at.cmp(&a.last_sent_at));
                entries
            }
            Err(err) => {
                warn!(error = %err, "alert store unavailable, returning empty history");
                Vec::new()
            }
        }
    }
}
