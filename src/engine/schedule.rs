use std::time::{Duration, Instant};

/// A cancellable periodic schedule driven by the caller's clock.  Nothing
/// fires on its own; the event loop asks for [`Schedule::deadline()`] and calls
/// [`Schedule::fire()`] once that moment has passed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Schedule {
    period: Duration,
    next: Option<Instant>,
}

impl Schedule {
    /// Create a disarmed schedule
    pub(crate) const fn new(period: Duration) -> Schedule {
        Schedule { period, next: None }
    }

    /// Start firing once every period, beginning one period after `now`
    pub(crate) fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Stop firing.  Cancelling a disarmed schedule does nothing.
    pub(crate) fn cancel(&mut self) {
        self.next = None;
    }

    /// The moment at which the schedule next fires, if armed
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// If the schedule is due as of `now`, advance it by one period and
    /// return the deadline that was reached
    pub(crate) fn fire(&mut self, now: Instant) -> Option<Instant> {
        let due = self.next.filter(|&t| t <= now)?;
        self.next = Some(due + self.period);
        Some(due)
    }
}
