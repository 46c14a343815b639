use std::cell::Cell;

use web_time::{Duration, Instant};

/// Source of wall-clock reads
///
/// The session only reads the clock to start its timer and to refresh `now`. Injecting it keeps
/// every transition deterministic under test.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
///
/// ```rust
/// use scimitar::{Clock, ManualClock};
/// use web_time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(2));
/// assert_eq!(clock.now() - start, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> Instant {
        (*self).now()
    }
}

/// Start time and latest refresh of a typing session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimer {
    started_at: Option<Instant>,
    now: Option<Instant>,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            now: None,
        }
    }

    /// Start the timer, unless it is already running
    pub fn start(&mut self, at: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(at);
            self.now = Some(at);
        }
    }

    /// Refresh `now`. Ignored until the timer has started.
    pub fn refresh(&mut self, at: Instant) {
        if self.started_at.is_some() {
            self.now = Some(at);
        }
    }

    pub fn clear(&mut self) {
        self.started_at = None;
        self.now = None;
    }

    pub const fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Get the time between start and the last refresh, or zero if not started
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.now) {
            (Some(start), Some(now)) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }
}

/// The recurring refresh of a running session
///
/// A ticker is either disarmed, or armed with the instant its next tick is due. Disarming
/// forgets the due instant, so a tick scheduled before a reset can never fire after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the next tick one interval from `now`. Keeps an existing schedule.
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if a tick is due at `now`, and schedules the following one
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when disarmed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_timer() {
        let clock = ManualClock::new();
        let mut timer = SessionTimer::new();

        assert!(!timer.has_started());
        assert_eq!(timer.elapsed(), Duration::ZERO);

        // Refresh before start is ignored
        timer.refresh(clock.now());
        assert!(!timer.has_started());

        timer.start(clock.now());
        clock.advance(Duration::from_secs(3));
        assert_eq!(timer.elapsed(), Duration::ZERO);

        timer.refresh(clock.now());
        assert_eq!(timer.elapsed(), Duration::from_secs(3));

        // Starting again keeps the original start
        timer.start(clock.now());
        assert_eq!(timer.elapsed(), Duration::from_secs(3));

        timer.clear();
        assert!(!timer.has_started());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_ticker() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        assert!(!ticker.poll(clock.now()));
        assert_eq!(ticker.remaining(clock.now()), None);

        ticker.arm(clock.now());
        assert!(ticker.is_armed());
        assert!(!ticker.poll(clock.now()));

        clock.advance(Duration::from_millis(400));
        assert_eq!(
            ticker.remaining(clock.now()),
            Some(Duration::from_millis(600))
        );

        clock.advance(Duration::from_millis(600));
        assert!(ticker.poll(clock.now()));
        assert!(!ticker.poll(clock.now()));

        ticker.disarm();
        clock.advance(Duration::from_secs(5));
        assert!(!ticker.poll(clock.now()));
    }
}
