/// Outbound notification hook (email/webhook adapter). The boolean is the
/// sole success signal; there is no partial-success or retry-hint channel,
/// so a failed send simply leaves the batch eligible for the next tick.
///
/// `send` is called from the scheduler's async tick, so implementations
/// doing network I/O must hand the call off to a blocking pool (for
/// example `tokio::task::block_in_place`) instead of stalling the runtime
/// worker.
pub trait AlertDispatcher: Send + Sync {
    fn send(&self, title: &str, html_body: &str) -> bool;
}
