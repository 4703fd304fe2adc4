use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::dispatcher::AlertDispatcher;
use super::repository::AlertStore;
use super::service::AlertService;
use crate::clock::Clock;

/// Recurring trigger for the alert pipeline. Fires once immediately on
/// startup, then on a fixed interval, and keeps running regardless of
/// individual tick outcomes. Retry is implicit: a failed tick leaves the
/// dedup records untouched, so the next tick recomputes the same batch.
pub struct AlertScheduler<S, D, C> {
    service: Arc<AlertService<S, D, C>>,
    interval: Duration,
}

impl<S, D, C> AlertScheduler<S, D, C>
where
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    pub fn new(service: Arc<AlertService<S, D, C>>, interval_minutes: u64) -> Self {
        Self {
            service,
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
        }
    }

    /// Run the schedule until the task is dropped. The first tick completes
    /// before the first sleep.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "training alert scheduler started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if !self.service.dispatch_pending() {
                warn!("alert tick failed; retrying on next interval");
            }
        }
    }
}
