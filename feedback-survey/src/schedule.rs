//! The single delayed reset a runner may have pending.
//!
//! Both the thank-you screen and the stale-completion guard return the
//! survey to its welcome screen after a delay. They share one slot: setting
//! a new reset replaces the old one, and dropping the slot drops the reset.

use std::time::{Duration, Instant};

/// Why a reset was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// A submission just finished; leave the thank-you screen.
    ThankYou,

    /// The store said the survey was already completed when it was mounted.
    StaleCompletion,
}

/// A reset waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReset {
    due: Instant,
    cause: ResetCause,
}

impl PendingReset {
    pub fn new(now: Instant, delay: Duration, cause: ResetCause) -> Self {
        Self {
            due: now + delay,
            cause,
        }
    }

    pub fn cause(&self) -> ResetCause {
        self.cause
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

/// Owner of at most one pending reset.
#[derive(Debug, Default)]
pub(crate) struct ResetSlot {
    pending: Option<PendingReset>,
}

impl ResetSlot {
    /// Schedule a reset, replacing any pending one.
    pub(crate) fn schedule(&mut self, reset: PendingReset) -> Option<PendingReset> {
        let replaced = self.pending.replace(reset);
        if let Some(old) = replaced {
            tracing::debug!(old = ?old.cause(), new = ?reset.cause(), "replacing pending reset");
        }
        replaced
    }

    pub(crate) fn cancel(&mut self) -> Option<PendingReset> {
        self.pending.take()
    }

    pub(crate) fn pending(&self) -> Option<&PendingReset> {
        self.pending.as_ref()
    }

    /// Take the pending reset if its deadline has passed.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<PendingReset> {
        if self.pending.is_some_and(|reset| reset.is_due(now)) {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_deadline() {
        let now = Instant::now();
        let mut slot = ResetSlot::default();
        slot.schedule(PendingReset::new(now, Duration::from_secs(5), ResetCause::ThankYou));

        assert_eq!(slot.take_due(now + Duration::from_secs(4)), None);
        let fired = slot.take_due(now + Duration::from_secs(5)).unwrap();
        assert_eq!(fired.cause(), ResetCause::ThankYou);
        assert!(slot.pending().is_none());
    }

    #[test]
    fn scheduling_replaces_pending_reset() {
        let now = Instant::now();
        let mut slot = ResetSlot::default();
        slot.schedule(PendingReset::new(
            now,
            Duration::from_secs(5),
            ResetCause::StaleCompletion,
        ));
        let replaced = slot.schedule(PendingReset::new(
            now + Duration::from_secs(3),
            Duration::from_secs(5),
            ResetCause::ThankYou,
        ));

        assert_eq!(replaced.map(|r| r.cause()), Some(ResetCause::StaleCompletion));
        assert_eq!(slot.take_due(now + Duration::from_secs(5)), None);
        assert_eq!(
            slot.take_due(now + Duration::from_secs(8)).map(|r| r.cause()),
            Some(ResetCause::ThankYou)
        );
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let now = Instant::now();
        let reset = PendingReset::new(now, Duration::from_secs(2), ResetCause::ThankYou);
        assert_eq!(reset.remaining(now), Duration::from_secs(2));
        assert_eq!(reset.remaining(now + Duration::from_secs(10)), Duration::ZERO);
    }

    #[test]
    fn cancel_empties_slot() {
        let now = Instant::now();
        let mut slot = ResetSlot::default();
        slot.schedule(PendingReset::new(now, Duration::ZERO, ResetCause::ThankYou));
        assert!(slot.cancel().is_some());
        assert_eq!(slot.take_due(now), None);
    }
}
