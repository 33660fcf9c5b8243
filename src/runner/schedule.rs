use std::time::{Duration, Instant};

/// Identifies one scheduled cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// How a scheduled handle keeps firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fires repeatedly at a fixed period until cancelled
    Interval,
    /// Fires once; the owner re-arms it after every tick
    Frame,
}

/// The host's timer, driving [`Runner::tick`]
///
/// [`Runner::tick`]: super::Runner::tick
pub trait Scheduler {
    fn cadence(&self) -> Cadence;

    /// Arms a new tick and returns its handle
    fn schedule(&mut self) -> TickHandle;

    /// Cancels a pending tick; unknown or already fired handles are ignored
    fn cancel(&mut self, handle: TickHandle);
}

/// Default period between interval ticks
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
/// Period of one display frame at 60Hz
pub const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// A deadline-based [`Scheduler`] for a polling event loop
///
/// The loop asks [`TimerScheduler::timeout`] how long it may block waiting
/// for input, then collects fired handles with [`TimerScheduler::due`].
#[derive(Debug)]
pub struct TimerScheduler {
    cadence: Cadence,
    period: Duration,
    next_id: u64,
    armed: Option<(TickHandle, Instant)>,
}

impl TimerScheduler {
    pub fn interval(period: Duration) -> Self {
        Self::new(Cadence::Interval, period)
    }
    pub fn frame() -> Self {
        Self::new(Cadence::Frame, FRAME_PERIOD)
    }
    fn new(cadence: Cadence, period: Duration) -> Self {
        Self {
            cadence,
            period,
            next_id: 0,
            armed: None,
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// How long the caller may wait before the next tick is due
    ///
    /// [`None`] means nothing is armed and the caller may wait indefinitely.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Returns the armed handle if its deadline has passed
    ///
    /// An interval is pushed back by one period; a frame is disarmed.
    pub fn due(&mut self, now: Instant) -> Option<TickHandle> {
        let (handle, deadline) = self.armed?;
        if deadline > now {
            return None;
        }
        self.armed = match self.cadence {
            Cadence::Interval => {
                let next = deadline + self.period;
                // don't try to catch up on missed periods
                let next = if next > now { next } else { now + self.period };
                Some((handle, next))
            }
            Cadence::Frame => None,
        };
        Some(handle)
    }
}

impl Scheduler for TimerScheduler {
    #[inline]
    fn cadence(&self) -> Cadence {
        self.cadence
    }

    fn schedule(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some((handle, Instant::now() + self.period));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            self.armed = None;
        }
    }
}
