#![forbid(unsafe_code)]

//! Cooperative repeating timer.
//!
//! [`AutoplayTimer`] is the single-threaded counterpart of a repeating
//! interval subscription: instead of a background thread sleeping on a stop
//! signal, the host polls it from its own event loop and gets back the number
//! of intervals that elapsed.
//!
//! # Cancellation
//!
//! Every `start` and every `cancel` bumps a generation counter. A
//! [`TimerHandle`] remembers the generation it was issued for, so a handle
//! obtained before a cancel is stale forever, even if the timer is armed
//! again afterwards. A cancelled timer never reports a fire, no matter how
//! far the clock moves.
//!
//! # Example
//!
//! ```
//! use folio_runtime::timer::AutoplayTimer;
//! use std::time::{Duration, Instant};
//!
//! let mut timer = AutoplayTimer::new(Duration::from_millis(1000));
//! let t0 = Instant::now();
//! let handle = timer.start(t0);
//!
//! assert_eq!(timer.poll(t0 + Duration::from_millis(999)), 0);
//! assert_eq!(timer.poll(t0 + Duration::from_millis(1000)), 1);
//! assert_eq!(timer.poll(t0 + Duration::from_millis(3500)), 2);
//!
//! timer.cancel();
//! assert!(!timer.is_current(handle));
//! assert_eq!(timer.poll(t0 + Duration::from_secs(60)), 0);
//! ```

use web_time::{Duration, Instant};

/// Shortest interval the timer accepts.
pub const MIN_TIMER_INTERVAL: Duration = Duration::from_millis(1);

/// Identifies one arming of an [`AutoplayTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    generation: u64,
}

impl TimerHandle {
    /// The generation this handle was issued for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// A cancellable, pollable repeating timer.
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    interval: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl AutoplayTimer {
    /// Create a disarmed timer. Intervals below [`MIN_TIMER_INTERVAL`] are raised to it.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_TIMER_INTERVAL),
            deadline: None,
            generation: 0,
        }
    }

    /// The repeat interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the repeat interval.
    ///
    /// An armed timer keeps its current deadline; restart it to apply the
    /// new interval from zero.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_TIMER_INTERVAL);
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Handle for the current arming, if armed.
    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.deadline.map(|_| TimerHandle {
            generation: self.generation,
        })
    }

    /// Whether `handle` refers to the current, still armed, timer.
    #[must_use]
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.deadline.is_some() && handle.generation == self.generation
    }

    /// Arm the timer so it first fires one full interval after `now`.
    ///
    /// Any previous arming is invalidated; nothing carries over from it.
    pub fn start(&mut self, now: Instant) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = now.checked_add(self.interval);
        tracing::debug!(
            generation = self.generation,
            interval_ms = self.interval.as_millis() as u64,
            "autoplay timer armed"
        );
        TimerHandle {
            generation: self.generation,
        }
    }

    /// Disarm the timer. Returns `true` if it was armed.
    pub fn cancel(&mut self) -> bool {
        if self.deadline.take().is_none() {
            return false;
        }
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(generation = self.generation, "autoplay timer cancelled");
        true
    }

    /// Number of whole intervals that elapsed up to `now`.
    ///
    /// The deadline moves forward by exactly that many intervals, so
    /// repeated polls never double count and never drift.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }

        let overdue = now.saturating_duration_since(deadline);
        let fires = 1 + overdue.as_nanos() / self.interval.as_nanos();
        let fires = u32::try_from(fires).unwrap_or(u32::MAX);

        self.deadline = self
            .interval
            .checked_mul(fires)
            .and_then(|span| deadline.checked_add(span));
        fires
    }

    /// Time left until the next fire, or `None` when disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
