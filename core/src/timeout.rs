//! Deadline tracking and bounded polling on top of [`Clock`].

use core::time::Duration;

use crate::error::{Error, Result};
use crate::traits::Clock;

/// Absolute deadline on a [`Clock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    deadline_ns: u64,
}

impl Timeout {
    /// Deadline `duration` from now
    pub fn start<C: Clock + ?Sized>(clock: &C, duration: Duration) -> Self {
        let span = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        Self {
            deadline_ns: clock.now_ns().saturating_add(span),
        }
    }

    /// Whether the deadline has passed
    pub fn expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        clock.now_ns() >= self.deadline_ns
    }
}

/// Poll `done` every `interval_ms` until it holds or `duration` elapses.
///
/// Expiry is sampled before each poll so the condition always gets one
/// last look after the deadline passes.
pub fn with_timeout<C, F>(clock: &C, duration: Duration, interval_ms: u32, mut done: F) -> Result<()>
where
    C: Clock + ?Sized,
    F: FnMut() -> bool,
{
    let timeout = Timeout::start(clock, duration);
    loop {
        let expired = timeout.expired(clock);
        if done() {
            return Ok(());
        }
        if expired {
            return Err(Error::Timeout);
        }
        clock.sleep_ms(interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU64, Ordering};

    struct StepClock(AtomicU64);

    impl Clock for StepClock {
        fn now_ns(&self) -> u64 {
            self.0.load(Ordering::Relaxed)
        }

        fn sleep_ms(&self, ms: u32) {
            self.0.fetch_add(u64::from(ms) * 1_000_000, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_with_timeout_succeeds_eventually() {
        let clock = StepClock(AtomicU64::new(0));
        let mut polls = 0;
        let result = with_timeout(&clock, Duration::from_millis(10), 1, || {
            polls += 1;
            polls == 4
        });
        assert_eq!(result, Ok(()));
        assert_eq!(clock.now_ns(), 3_000_000);
    }

    #[test]
    fn test_with_timeout_expires() {
        let clock = StepClock(AtomicU64::new(0));
        let mut polls = 0;
        let result = with_timeout(&clock, Duration::from_millis(5), 1, || {
            polls += 1;
            false
        });
        assert_eq!(result, Err(Error::Timeout));
        // polls at t = 0..=5 ms
        assert_eq!(polls, 6);
    }
}
