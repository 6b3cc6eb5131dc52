#![forbid(unsafe_code)]

//! Testimonial carousel: the view-facing adapter over the engine.
//!
//! A [`Carousel`] ties together the shuffled [`DisplayOrder`], a
//! height-adaptive [`RotationScheduler`] and the key map. Hosts feed it
//! [`Event`]s and call [`tick`](Carousel::tick) from their loop; renderers
//! read a [`CarouselSnapshot`].
//!
//! # Example
//!
//! ```
//! use folio_core::event::Event;
//! use folio_runtime::{CarouselConfig, ManualClock};
//! use folio_widgets::carousel::Carousel;
//! use folio_widgets::testimonial::Testimonial;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let items = vec![
//!     Testimonial::new("Ada", "Sharp"),
//!     Testimonial::new("Grace", "Reliable"),
//!     Testimonial::new("Linus", "Fast"),
//! ];
//! let clock = ManualClock::new();
//! let mut carousel = Carousel::with_parts(
//!     items,
//!     &CarouselConfig::default(),
//!     clock.clone(),
//!     SmallRng::seed_from_u64(1),
//! );
//! carousel.handle_event(&Event::Resize { height_px: 440.0 });
//!
//! let snapshot = carousel.snapshot();
//! assert_eq!(snapshot.visible_slice.len(), 2);
//! assert_eq!(snapshot.live_text(), "item 1 of 3");
//! ```

use std::rc::Rc;

use folio_core::event::{Event, KeyEvent};
use folio_core::keybinding::{CarouselAction, KeyMap};
use folio_runtime::{CarouselConfig, Clock, Subscription, SystemClock};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

use crate::rotation::{PageDirection, RotationScheduler, RotationState};
use crate::shuffle::{DisplayOrder, shuffle};
use crate::testimonial::Authored;
use crate::visible_window::{HeightAdaptive, SliceEntry, VisibleWindow, get_visible_slice};

/// What a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot<'a, T> {
    /// Entries to draw, teaser last.
    pub visible_slice: Vec<SliceEntry<'a, T>>,
    /// Position of the first shown item in the display order.
    pub active_index: usize,
    /// Manual pause flag.
    pub is_paused: bool,
    /// Hover flag.
    pub is_hovering: bool,
    /// Screenfuls needed to show every item.
    pub page_count: usize,
    /// Screenful holding the active index.
    pub current_page: usize,
    /// Item count.
    pub len: usize,
}

impl<T> CarouselSnapshot<'_, T> {
    /// Live-region text, e.g. `"item 2 of 5"`.
    #[must_use]
    pub fn live_text(&self) -> String {
        if self.len == 0 {
            return "no items".to_owned();
        }
        format!("item {} of {}", self.active_index + 1, self.len)
    }
}

/// A shuffled, height-adaptive, auto-rotating carousel.
#[derive(Debug)]
pub struct Carousel<T, C: Clock = SystemClock, R: Rng = SmallRng> {
    items: Rc<[T]>,
    order: DisplayOrder,
    rng: R,
    keymap: KeyMap,
    scheduler: RotationScheduler<HeightAdaptive, C>,
}

impl<T: Authored> Carousel<T> {
    /// Carousel on wall-clock time with an OS-seeded shuffle.
    #[must_use]
    pub fn new(items: impl Into<Rc<[T]>>, config: &CarouselConfig) -> Self {
        Self::with_parts(items, config, SystemClock, SmallRng::from_os_rng())
    }
}

impl<T: Authored, C: Clock, R: Rng> Carousel<T, C, R> {
    /// Carousel with an explicit clock and random source.
    #[must_use]
    pub fn with_parts(
        items: impl Into<Rc<[T]>>,
        config: &CarouselConfig,
        clock: C,
        mut rng: R,
    ) -> Self {
        let items = items.into();
        let order = shuffle(&items, &mut rng);
        let policy = HeightAdaptive::from_config(config);
        let scheduler = RotationScheduler::with_clock(items.len(), config, policy, clock);
        Self {
            items,
            order,
            rng,
            keymap: KeyMap::default(),
            scheduler,
        }
    }

    /// Replace the key map.
    #[must_use]
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// The item list.
    #[must_use]
    pub fn items(&self) -> &Rc<[T]> {
        &self.items
    }

    /// The current display order.
    #[must_use]
    pub fn order(&self) -> &DisplayOrder {
        &self.order
    }

    /// Item count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The scheduler, read-only.
    #[must_use]
    pub fn scheduler(&self) -> &RotationScheduler<HeightAdaptive, C> {
        &self.scheduler
    }

    /// Current rotation state.
    #[must_use]
    pub fn state(&self) -> RotationState {
        self.scheduler.state()
    }

    /// Current visible window.
    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.scheduler.window()
    }

    /// The item at the active position.
    #[must_use]
    pub fn active_item(&self) -> Option<&T> {
        let index = self.order.get(self.scheduler.active_index())?;
        self.items.get(index)
    }

    // --- Input -------------------------------------------------------------

    /// Route a host event. Returns `true` if anything changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::PointerEnter => self.scheduler.set_hovering(true),
            Event::PointerLeave => self.scheduler.set_hovering(false),
            Event::Resize { height_px } => self.set_container_height(*height_px),
        }
    }

    /// Map and apply a key. Unbound keys return `false`.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.keymap
            .map(key)
            .is_some_and(|action| self.scheduler.apply(action))
    }

    /// Apply a navigation command.
    pub fn apply(&mut self, action: CarouselAction) -> bool {
        self.scheduler.apply(action)
    }

    /// Step forward, wrapping.
    pub fn next(&mut self) -> bool {
        self.scheduler.next()
    }

    /// Step back, wrapping.
    pub fn previous(&mut self) -> bool {
        self.scheduler.previous()
    }

    /// Jump to the first position.
    pub fn first(&mut self) -> bool {
        self.scheduler.first()
    }

    /// Jump to the last position.
    pub fn last(&mut self) -> bool {
        self.scheduler.last()
    }

    /// Jump one screenful, clamped.
    pub fn go_to_page(&mut self, direction: PageDirection) -> bool {
        self.scheduler.go_to_page(direction)
    }

    /// Flip manual pause; returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.scheduler.toggle_pause()
    }

    /// Set the hover flag.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        self.scheduler.set_hovering(hovering)
    }

    /// Record a new container height. Returns `true` if the window changed,
    /// in which case subscribers are notified.
    pub fn set_container_height(&mut self, height_px: f64) -> bool {
        let changed = self
            .scheduler
            .update_policy(|policy| policy.set_container_height(height_px));
        #[cfg(feature = "tracing")]
        if changed {
            let window = self.scheduler.window();
            tracing::debug!(
                message = "carousel.resize",
                height_px,
                full_count = window.full_count,
                has_partial = window.has_partial
            );
        }
        changed
    }

    // --- Time --------------------------------------------------------------

    /// Apply due autoplay steps.
    pub fn tick(&mut self) -> u32 {
        self.scheduler.tick()
    }

    /// Time until the next autoplay step.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.scheduler.time_until_next_tick()
    }

    // --- Items -------------------------------------------------------------

    /// Draw a fresh display order. The active index is kept and subscribers
    /// see a new [`revision`](RotationState::revision).
    pub fn reshuffle(&mut self) {
        self.draw_order();
        self.scheduler.mark_content_changed();
    }

    /// Swap in a new item list.
    ///
    /// The same list (by pointer) is a no-op returning `false`. A different
    /// list is reshuffled and the active index clamped in one step.
    pub fn set_items(&mut self, items: impl Into<Rc<[T]>>) -> bool {
        let items = items.into();
        if Rc::ptr_eq(&self.items, &items) {
            return false;
        }
        self.items = items;
        self.draw_order();
        self.scheduler.set_len(self.items.len());
        true
    }

    fn draw_order(&mut self) {
        self.order = shuffle(&self.items, &mut self.rng);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "carousel.reshuffle", len = self.items.len());
    }

    // --- Rendering ---------------------------------------------------------

    /// Everything a renderer needs for the current frame.
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot<'_, T> {
        let state = self.scheduler.state();
        CarouselSnapshot {
            visible_slice: get_visible_slice(
                &self.order,
                &self.items,
                state.active_index,
                self.scheduler.window(),
            ),
            active_index: state.active_index,
            is_paused: state.is_paused,
            is_hovering: state.is_hovering,
            page_count: self.scheduler.page_count(),
            current_page: self.scheduler.current_page(),
            len: self.items.len(),
        }
    }

    /// Call `callback` after every rotation state change.
    pub fn subscribe(&self, callback: impl Fn(&RotationState) + 'static) -> Subscription {
        self.scheduler.subscribe(callback)
    }

    /// Stop autoplay for good.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
    }
}
