//! Collaborators injected into [`DragEvents`](super::DragEvents): listener
//! registration and the deferred-click timer.

use std::time::Duration;

use crate::error::Result;

/// Installs and removes the platform listeners that feed a gesture tracker.
///
/// The element listener delivers pointer-down; the document listeners deliver
/// pointer-move and pointer-up so a drag keeps tracking after the pointer
/// leaves the element.
pub trait ListenerHost {
    fn listen_element(&mut self);
    fn unlisten_element(&mut self);
    fn listen_document(&mut self);
    fn unlisten_document(&mut self);
}

/// For hosts that forward events by hand and have nothing to register.
impl ListenerHost for () {
    fn listen_element(&mut self) {}
    fn unlisten_element(&mut self) {}
    fn listen_document(&mut self) {}
    fn unlisten_document(&mut self) {}
}

/// Identifies one scheduled timer. Allocated by the gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// Single-shot deferred callbacks.
///
/// When a timer expires the host calls
/// [`DragEvents::handle_timer`](super::DragEvents::handle_timer) with its token.
pub trait Scheduler {
    /// Arm a timer that expires after `delay`.
    ///
    /// # Errors
    /// Returns an error if the platform refused to schedule the timer.
    fn schedule_once(&mut self, token: TimerToken, delay: Duration) -> Result<()>;

    /// Disarm a timer. Unknown or already-expired tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

/// Deterministic scheduler driven by an explicit clock.
///
/// Native hosts advance it from their event loop; tests advance it to step
/// through double-click windows.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    timers: Vec<(Duration, TimerToken)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock forward and return every token whose deadline has been
    /// reached, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now = self.now.saturating_add(by);
        let now = self.now;
        let mut expired: Vec<(Duration, TimerToken)> = Vec::new();
        self.timers.retain(|&(deadline, token)| {
            if deadline <= now {
                expired.push((deadline, token));
                false
            } else {
                true
            }
        });
        expired.sort();
        expired.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, token: TimerToken, delay: Duration) -> Result<()> {
        self.timers.push((self.now.saturating_add(delay), token));
        Ok(())
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timers.retain(|&(_, t)| t != token);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_expires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler
            .schedule_once(TimerToken(1), Duration::from_millis(300))
            .unwrap();
        scheduler
            .schedule_once(TimerToken(2), Duration::from_millis(100))
            .unwrap();

        assert!(scheduler.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(201)),
            vec![TimerToken(2), TimerToken(1)]
        );
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(300));
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut scheduler = ManualScheduler::new();
        scheduler
            .schedule_once(TimerToken(7), Duration::from_millis(10))
            .unwrap();
        scheduler.cancel(TimerToken(7));
        scheduler.cancel(TimerToken(8));
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }
}
