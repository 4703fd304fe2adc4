use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" for both calendar-day classification and the rolling
/// alert dedup window. Injectable so day boundaries are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day. Classification compares whole days, so the
    /// time-of-day component never leaks into status decisions.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
