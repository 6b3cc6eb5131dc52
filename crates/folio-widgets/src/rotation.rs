#![forbid(unsafe_code)]

//! Rotation scheduler: the shared autoplay and navigation core.
//!
//! A [`RotationScheduler`] owns the active index of a rotating list, the
//! manual-pause and hover flags, and the autoplay timer. What it shows at
//! once comes from its [`WindowPolicy`], so the testimonial carousel and the
//! one-slide host run the same state machine.
//!
//! # State Machine
//!
//! ```text
//!             toggle_pause            set_hovering(true)
//!   Playing ───────────────► Paused   Playing ─────────► Hovered
//!      ▲                        │        ▲                   │
//!      └────── toggle_pause ────┘        └─ set_hovering(false)
//! ```
//!
//! Pause and hover are independent flags. Autoplay runs only while
//!
//! ```text
//! !is_paused && !(is_hovering && pause_on_hover) && len > 1 && !torn_down
//! ```
//!
//! Every change of that condition cancels the timer and, when the condition
//! holds again, restarts it from zero. Navigation that moves the index also
//! restarts an armed timer.
//!
//! # Time
//!
//! Nothing runs in the background. The host calls [`RotationScheduler::tick`]
//! from its event loop; each tick polls the timer against the scheduler's
//! [`Clock`] and applies every whole interval that elapsed.
//!
//! # Invariants
//!
//! 1. `active_index < len` whenever `len > 0`, and `0` otherwise.
//! 2. Single steps wrap; page jumps clamp to `[0, len - 1]`.
//! 3. After [`teardown`](RotationScheduler::teardown) no tick advances.

use folio_core::keybinding::CarouselAction;
use folio_runtime::{AutoplayTimer, CarouselConfig, Clock, Observable, Subscription, SystemClock};
use web_time::Duration;

use crate::visible_window::{SingleSlide, VisibleWindow, WindowPolicy};

/// Observable part of a scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RotationState {
    /// Position in the display order of the first shown item.
    pub active_index: usize,
    /// Manual pause flag.
    pub is_paused: bool,
    /// Pointer-over flag.
    pub is_hovering: bool,
    /// Window the policy reported at the last change.
    pub window: VisibleWindow,
    /// Bumped whenever the rendered content changes in place: a new window,
    /// a new display order or a new item list.
    pub revision: u64,
}

/// Counters for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationStats {
    /// Steps taken by the autoplay timer.
    pub autoplay_advances: u64,
    /// Navigation commands that moved the active index.
    pub manual_moves: u64,
    /// Times the timer was (re)armed.
    pub timer_starts: u64,
}

/// Direction of a page jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDirection {
    /// Toward the start.
    Backward,
    /// Toward the end.
    Forward,
}

/// Autoplay, pause and navigation state for one rotating list.
#[derive(Debug)]
pub struct RotationScheduler<P: WindowPolicy = SingleSlide, C: Clock = SystemClock> {
    len: usize,
    state: RotationState,
    pause_on_hover: bool,
    policy: P,
    clock: C,
    timer: AutoplayTimer,
    changes: Observable<RotationState>,
    stats: RotationStats,
    torn_down: bool,
}

impl<P: WindowPolicy> RotationScheduler<P, SystemClock> {
    /// Scheduler on wall-clock time.
    #[must_use]
    pub fn new(len: usize, config: &CarouselConfig, policy: P) -> Self {
        Self::with_clock(len, config, policy, SystemClock)
    }
}

impl<P: WindowPolicy, C: Clock> RotationScheduler<P, C> {
    /// Scheduler reading time from `clock`.
    ///
    /// Starts at index 0, unpaused and not hovered, with the timer armed if
    /// there is more than one item.
    #[must_use]
    pub fn with_clock(len: usize, config: &CarouselConfig, policy: P, clock: C) -> Self {
        let state = RotationState {
            window: policy.window(),
            ..RotationState::default()
        };
        let mut scheduler = Self {
            len,
            state,
            pause_on_hover: config.pause_on_hover,
            policy,
            clock,
            timer: AutoplayTimer::new(config.autoplay_interval()),
            changes: Observable::new(state),
            stats: RotationStats::default(),
            torn_down: false,
        };
        scheduler.sync_timer();
        scheduler
    }

    // --- Accessors ---------------------------------------------------------

    /// Number of items rotated over.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to rotate.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Current active index.
    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    /// Manual pause flag.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    /// Hover flag.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.state.is_hovering
    }

    /// Whether hovering suspends autoplay.
    #[must_use]
    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    /// The effective autoplay condition.
    #[must_use]
    pub fn autoplay_enabled(&self) -> bool {
        !self.torn_down
            && self.len > 1
            && !self.state.is_paused
            && !(self.state.is_hovering && self.pause_on_hover)
    }

    /// Whether the timer is currently armed.
    #[must_use]
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// The autoplay timer, read-only.
    #[must_use]
    pub fn timer(&self) -> &AutoplayTimer {
        &self.timer
    }

    /// The current visible window.
    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.policy.window()
    }

    /// The window policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Update the window policy (e.g. to record a new container height).
    ///
    /// Subscribers are notified when the reported window changes. The active
    /// index is unaffected.
    pub fn update_policy<R>(&mut self, update: impl FnOnce(&mut P) -> R) -> R {
        let result = update(&mut self.policy);
        if self.policy.window() != self.state.window {
            self.mark_content_changed();
        }
        result
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Counters.
    #[must_use]
    pub fn stats(&self) -> RotationStats {
        self.stats
    }

    /// Pages of `full_count` items needed to cover the list.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.window().page_count(self.len)
    }

    /// Page holding the active index.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.window().page_of(self.state.active_index)
    }

    /// Whether [`teardown`](Self::teardown) was called.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // --- Change feed -------------------------------------------------------

    /// Call `callback` after every state change.
    pub fn subscribe(&self, callback: impl Fn(&RotationState) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Handle to the state feed.
    #[must_use]
    pub fn observable(&self) -> Observable<RotationState> {
        self.changes.clone()
    }

    // --- Navigation --------------------------------------------------------

    /// Step one forward, wrapping.
    pub fn next(&mut self) -> bool {
        self.advance(1)
    }

    /// Step one back, wrapping.
    pub fn previous(&mut self) -> bool {
        self.advance(-1)
    }

    /// Move by `step` positions, wrapping in both directions.
    pub fn advance(&mut self, step: isize) -> bool {
        let Some(target) = self.wrapped(step) else {
            return false;
        };
        self.navigate("advance", target)
    }

    /// Jump to index 0.
    pub fn first(&mut self) -> bool {
        self.navigate("first", 0)
    }

    /// Jump to the last index.
    pub fn last(&mut self) -> bool {
        let last = self.len.saturating_sub(1);
        self.navigate("last", last)
    }

    /// Jump one window's worth of items, clamped to `[0, len - 1]`.
    pub fn go_to_page(&mut self, direction: PageDirection) -> bool {
        let step = self.window().full_count;
        let active = self.state.active_index;
        let target = match direction {
            PageDirection::Forward => active.saturating_add(step).min(self.len.saturating_sub(1)),
            PageDirection::Backward => active.saturating_sub(step),
        };
        self.navigate("page", target)
    }

    /// Jump to `index` modulo the length.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.len == 0 {
            return false;
        }
        self.navigate("jump", index % self.len)
    }

    /// Dispatch a key-derived command.
    pub fn apply(&mut self, action: CarouselAction) -> bool {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.action", action = action.as_str());
        match action {
            CarouselAction::Previous => self.previous(),
            CarouselAction::Next => self.next(),
            CarouselAction::TogglePause => self.set_paused(!self.state.is_paused),
            CarouselAction::First => self.first(),
            CarouselAction::Last => self.last(),
            CarouselAction::PageBackward => self.go_to_page(PageDirection::Backward),
            CarouselAction::PageForward => self.go_to_page(PageDirection::Forward),
        }
    }

    // --- Pause and hover ---------------------------------------------------

    /// Flip the manual pause flag and return the resulting value.
    ///
    /// After [`teardown`](Self::teardown) nothing flips.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.state.is_paused);
        self.state.is_paused
    }

    /// Set the manual pause flag. Returns `true` if it changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.torn_down || self.state.is_paused == paused {
            return false;
        }
        self.state.is_paused = paused;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.pause", paused, hovering = self.state.is_hovering);
        self.sync_timer();
        self.publish();
        true
    }

    /// Set the hover flag. Returns `true` if it changed.
    ///
    /// Leaving hover resumes autoplay only when not manually paused.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        if self.torn_down || self.state.is_hovering == hovering {
            return false;
        }
        self.state.is_hovering = hovering;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.hover", hovering, paused = self.state.is_paused);
        self.sync_timer();
        self.publish();
        true
    }

    /// Change whether hovering suspends autoplay.
    pub fn set_pause_on_hover(&mut self, pause_on_hover: bool) {
        self.pause_on_hover = pause_on_hover;
        self.sync_timer();
    }

    /// Change the autoplay interval. An armed timer restarts from zero.
    pub fn set_autoplay_interval(&mut self, interval: Duration) {
        self.timer.set_interval(interval);
        if self.timer.is_armed() {
            self.restart_timer();
        }
    }

    // --- Time --------------------------------------------------------------

    /// Apply every autoplay step due by now. Returns the number of steps.
    pub fn tick(&mut self) -> u32 {
        if !self.autoplay_enabled() {
            return 0;
        }
        let fires = self.timer.poll(self.clock.now());
        if fires == 0 {
            return 0;
        }

        let from = self.state.active_index;
        let steps = usize::try_from(fires).unwrap_or(usize::MAX) % self.len;
        self.state.active_index = (from + steps) % self.len;
        self.stats.autoplay_advances += u64::from(fires);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.autoplay",
            fires,
            from,
            to = self.state.active_index
        );
        self.publish();
        fires
    }

    /// Time until the next autoplay step, or `None` while autoplay is off.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timer.time_until_due(self.clock.now())
    }

    // --- Lifecycle ---------------------------------------------------------

    /// Replace the item count. The active index is clamped to the new range
    /// and autoplay re-evaluated. Counts as a content change.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.state.active_index = self.state.active_index.min(len.saturating_sub(1));
        self.sync_timer();
        self.mark_content_changed();
    }

    /// Notify subscribers that what the current state renders has changed,
    /// e.g. after a reshuffle.
    pub fn mark_content_changed(&mut self) {
        self.state.revision = self.state.revision.wrapping_add(1);
        self.publish();
    }

    /// Cancel the timer for good. Later commands and ticks do nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.timer.cancel();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.teardown", len = self.len);
    }

    // --- Internals ---------------------------------------------------------

    fn wrapped(&self, step: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let magnitude = step.unsigned_abs() % self.len;
        let active = self.state.active_index;
        Some(if step >= 0 {
            (active + magnitude) % self.len
        } else {
            (active + self.len - magnitude) % self.len
        })
    }

    fn navigate(&mut self, reason: &'static str, target: usize) -> bool {
        if self.torn_down || self.len == 0 || target == self.state.active_index {
            return false;
        }
        let from = self.state.active_index;
        self.state.active_index = target;
        self.stats.manual_moves += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.navigate", reason, from, to = target);
        #[cfg(not(feature = "tracing"))]
        let _ = (reason, from);
        if self.timer.is_armed() {
            self.restart_timer();
        }
        self.publish();
        true
    }

    fn sync_timer(&mut self) {
        match (self.autoplay_enabled(), self.timer.is_armed()) {
            (true, false) => self.restart_timer(),
            (false, true) => {
                self.timer.cancel();
            }
            _ => {}
        }
    }

    fn restart_timer(&mut self) {
        self.timer.start(self.clock.now());
        self.stats.timer_starts += 1;
    }

    fn publish(&mut self) {
        self.state.window = self.policy.window();
        self.changes.set(self.state);
    }
}
