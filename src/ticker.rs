//! Elapsed-time ticker for the step views.
//!
//! The dashboard event loop owns the clock; the ticker only holds the next
//! deadline. It is armed while the selected step's phase is in the busy set
//! and disarmed otherwise, so a finished step never accumulates time. Each
//! step view owns exactly one ticker and drops it on unmount, which is what
//! keeps repeated mount/unmount cycles from stacking schedules.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ElapsedTicker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl ElapsedTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// One-second ticker, the dashboard default.
    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm or disarm based on the busy condition.
    ///
    /// Arming while already armed keeps the existing deadline, so calling
    /// this every loop iteration does not postpone the next tick.
    pub fn sync(&mut self, busy: bool, now: Instant) {
        match (busy, self.deadline) {
            (true, None) => self.deadline = Some(now + self.interval),
            (false, Some(_)) => self.deadline = None,
            _ => {}
        }
    }

    /// Number of whole intervals elapsed since the last poll.
    ///
    /// Advances the deadline past `now` so a stalled event loop catches up
    /// in one call instead of drifting.
    pub fn poll(&mut self, now: Instant) -> u64 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }
        let behind = now.duration_since(deadline);
        let ticks = 1 + behind.as_nanos() as u64 / self.interval.as_nanos().max(1) as u64;
        self.deadline = Some(deadline + self.interval * ticks as u32);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_starts_disarmed() {
        let mut ticker = ElapsedTicker::per_second();
        assert!(!ticker.is_armed());
        assert_eq!(ticker.poll(Instant::now()), 0);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut ticker = ElapsedTicker::per_second();
        ticker.sync(true, t0);

        assert_eq!(ticker.poll(t0), 0);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(ticker.poll(t0 + secs(1)), 1);
        assert_eq!(ticker.poll(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.poll(t0 + secs(2)), 1);
    }

    #[test]
    fn test_catches_up_after_stall() {
        let t0 = Instant::now();
        let mut ticker = ElapsedTicker::per_second();
        ticker.sync(true, t0);

        assert_eq!(ticker.poll(t0 + secs(5)), 5);
        assert_eq!(ticker.poll(t0 + secs(5)), 0);
        assert_eq!(ticker.poll(t0 + secs(6)), 1);
    }

    #[test]
    fn test_disarm_stops_firing() {
        let t0 = Instant::now();
        let mut ticker = ElapsedTicker::per_second();
        ticker.sync(true, t0);
        ticker.sync(false, t0 + secs(1));
        assert!(!ticker.is_armed());
        assert_eq!(ticker.poll(t0 + secs(10)), 0);
    }

    #[test]
    fn test_rearm_does_not_backfill_suspended_time() {
        let t0 = Instant::now();
        let mut ticker = ElapsedTicker::per_second();
        ticker.sync(true, t0);
        assert_eq!(ticker.poll(t0 + secs(1)), 1);

        // Suspended for a long stretch, then re-armed.
        ticker.sync(false, t0 + secs(1));
        ticker.sync(true, t0 + secs(60));
        assert_eq!(ticker.poll(t0 + secs(60)), 0);
        assert_eq!(ticker.poll(t0 + secs(61)), 1);
    }

    #[test]
    fn test_repeated_sync_keeps_deadline() {
        let t0 = Instant::now();
        let mut ticker = ElapsedTicker::per_second();
        ticker.sync(true, t0);
        // The event loop syncs every iteration; the deadline must not slide.
        ticker.sync(true, t0 + Duration::from_millis(300));
        ticker.sync(true, t0 + Duration::from_millis(600));
        assert_eq!(ticker.poll(t0 + secs(1)), 1);
    }
}
