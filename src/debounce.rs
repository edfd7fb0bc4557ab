//! Settle a rapidly changing input into a single value after a quiet period.
//!
//! The debouncer does not own a timer. The owning event loop calls
//! [`Debouncer::poll`] on every tick, which keeps all state changes on the
//! caller's thread and lets tests drive time explicitly through the `*_at`
//! variants.

use std::time::{Duration, Instant};

/// Default quiet period before a typed query is committed.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    since: Instant,
}

/// Emits the latest observed value once it has stayed unchanged for the
/// configured quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer whose settled value starts as `initial`.
    pub fn new(initial: T, quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            settled: initial,
            pending: None,
        }
    }

    /// The last emitted value.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// The value waiting for the quiet period to elapse, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|pending| &pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn observe(&mut self, value: T) {
        self.observe_at(value, Instant::now());
    }

    /// Record `value` as the latest input at time `now`.
    ///
    /// Re-observing the pending value keeps its original deadline. Observing
    /// the settled value drops any pending one, since the latest input is
    /// already what downstream last saw.
    pub fn observe_at(&mut self, value: T, now: Instant) {
        if value == self.settled {
            self.pending = None;
            return;
        }
        if self.pending().is_some_and(|pending| *pending == value) {
            return;
        }
        self.pending = Some(Pending { value, since: now });
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    /// Emit the pending value if it has been quiet for long enough.
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|pending| now.saturating_duration_since(pending.since) >= self.quiet_period);
        if !ready {
            return None;
        }
        let pending = self.pending.take()?;
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    /// Time left before the pending value would be emitted.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|pending| {
            self.quiet_period
                .saturating_sub(now.saturating_duration_since(pending.since))
        })
    }

    /// Drop the pending emission without touching the settled value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
