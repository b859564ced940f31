//! Motion deadline tracking and the shared pending-timer count.
//!
//! Every shade that is waiting on a time limit holds one count in a
//! [`PendingTimers`] shared by all devices, so the surrounding runtime can tell
//! whether it is safe to idle. The counter is passed in by reference rather
//! than living in a global, which lets each test use its own.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::config::units::Millis;

/// Number of devices currently waiting on a motion deadline.
#[derive(Debug, Default)]
pub struct PendingTimers {
    count: AtomicUsize,
}

impl PendingTimers {
    /// Counter starting at zero.
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }

    /// Current count.
    #[inline]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Whether any device still has a timed motion outstanding.
    #[inline]
    pub fn any_pending(&self) -> bool {
        self.count() > 0
    }

    fn increment(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    fn decrement(&self) {
        // Clamped at zero, never wraps.
        let _ = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }
}

/// Deadline of the motion currently in flight for one device.
///
/// Holds at most one count in the shared [`PendingTimers`]; the count is given
/// back on [`disarm`](Self::disarm) or when the tracker is dropped.
#[derive(Debug)]
pub struct TimerTracker<'t> {
    counter: &'t PendingTimers,
    deadline: Millis,
    pending: bool,
}

impl<'t> TimerTracker<'t> {
    /// Idle tracker reporting into `counter`.
    pub fn new(counter: &'t PendingTimers) -> Self {
        Self {
            counter,
            deadline: Millis::ZERO,
            pending: false,
        }
    }

    /// Set the deadline to `now + duration` and take a count if not holding one.
    pub fn arm(&mut self, now: Millis, duration: Millis) {
        self.deadline = now.saturating_add(duration);
        if !self.pending {
            self.counter.increment();
            self.pending = true;
        }
    }

    /// Give the count back. Does nothing if not armed.
    pub fn disarm(&mut self) {
        if self.pending {
            self.counter.decrement();
            self.pending = false;
        }
    }

    /// Armed and `now` has reached the deadline.
    #[inline]
    pub fn is_expired(&self, now: Millis) -> bool {
        self.pending && now >= self.deadline
    }

    /// Whether this tracker holds a count.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Deadline of the armed motion.
    #[inline]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.then_some(self.deadline)
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.deadline().map(|d| d.saturating_sub(now))
    }
}

impl Drop for TimerTracker<'_> {
    fn drop(&mut self) {
        self.disarm();
    }
}
