#![forbid(unsafe_code)]

//! One-slide-at-a-time deck.
//!
//! [`SlideHost`] runs the same [`RotationScheduler`] as the carousel with the
//! [`SingleSlide`] policy. Slides keep their given order. Dot navigation
//! jumps straight to an index with [`go_to_slide`](SlideHost::go_to_slide).

use std::rc::Rc;

use folio_core::event::{Event, KeyEvent};
use folio_core::keybinding::{CarouselAction, KeyMap};
use folio_runtime::{CarouselConfig, Clock, Subscription, SystemClock};
use web_time::Duration;

use crate::rotation::{RotationScheduler, RotationState};
use crate::visible_window::SingleSlide;

/// Render state of a slide deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideSnapshot<'a, T> {
    /// The slide to draw.
    pub current: Option<&'a T>,
    /// Index of the current slide.
    pub active_index: usize,
    /// Manual pause flag.
    pub is_paused: bool,
    /// Hover flag.
    pub is_hovering: bool,
    /// Number of slides (one dot each).
    pub slide_count: usize,
}

impl<T> SlideSnapshot<'_, T> {
    /// Live-region text, e.g. `"slide 1 of 4"`.
    #[must_use]
    pub fn live_text(&self) -> String {
        if self.slide_count == 0 {
            return "no slides".to_owned();
        }
        format!("slide {} of {}", self.active_index + 1, self.slide_count)
    }

    /// `(index, is_active)` for each navigation dot.
    pub fn dots(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.slide_count).map(move |i| (i, i == self.active_index))
    }
}

/// An auto-rotating slide deck.
#[derive(Debug)]
pub struct SlideHost<T, C: Clock = SystemClock> {
    slides: Rc<[T]>,
    keymap: KeyMap,
    scheduler: RotationScheduler<SingleSlide, C>,
}

impl<T> SlideHost<T> {
    /// Deck on wall-clock time.
    #[must_use]
    pub fn new(slides: impl Into<Rc<[T]>>, config: &CarouselConfig) -> Self {
        Self::with_clock(slides, config, SystemClock)
    }
}

impl<T, C: Clock> SlideHost<T, C> {
    /// Deck reading time from `clock`.
    #[must_use]
    pub fn with_clock(slides: impl Into<Rc<[T]>>, config: &CarouselConfig, clock: C) -> Self {
        let slides = slides.into();
        let scheduler = RotationScheduler::with_clock(slides.len(), config, SingleSlide, clock);
        Self {
            slides,
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

    /// The slides.
    #[must_use]
    pub fn slides(&self) -> &Rc<[T]> {
        &self.slides
    }

    /// Slide count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The scheduler, read-only.
    #[must_use]
    pub fn scheduler(&self) -> &RotationScheduler<SingleSlide, C> {
        &self.scheduler
    }

    /// Current rotation state.
    #[must_use]
    pub fn state(&self) -> RotationState {
        self.scheduler.state()
    }

    /// The slide on show.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.slides.get(self.scheduler.active_index())
    }

    /// Jump to slide `index`, wrapping modulo the slide count.
    pub fn go_to_slide(&mut self, index: usize) -> bool {
        self.scheduler.go_to(index)
    }

    /// Route a host event. Resizes are ignored.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::PointerEnter => self.scheduler.set_hovering(true),
            Event::PointerLeave => self.scheduler.set_hovering(false),
            Event::Resize { .. } => false,
        }
    }

    /// Map and apply a key.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.keymap
            .map(key)
            .is_some_and(|action| self.scheduler.apply(action))
    }

    /// Apply a navigation command.
    pub fn apply(&mut self, action: CarouselAction) -> bool {
        self.scheduler.apply(action)
    }

    /// Next slide, wrapping.
    pub fn next(&mut self) -> bool {
        self.scheduler.next()
    }

    /// Previous slide, wrapping.
    pub fn previous(&mut self) -> bool {
        self.scheduler.previous()
    }

    /// Flip manual pause; returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.scheduler.toggle_pause()
    }

    /// Set the hover flag.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        self.scheduler.set_hovering(hovering)
    }

    /// Apply due autoplay steps.
    pub fn tick(&mut self) -> u32 {
        self.scheduler.tick()
    }

    /// Time until the next autoplay step.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.scheduler.time_until_next_tick()
    }

    /// Swap in new slides; the same list (by pointer) is a no-op.
    pub fn set_slides(&mut self, slides: impl Into<Rc<[T]>>) -> bool {
        let slides = slides.into();
        if Rc::ptr_eq(&self.slides, &slides) {
            return false;
        }
        self.slides = slides;
        self.scheduler.set_len(self.slides.len());
        true
    }

    /// Render state.
    #[must_use]
    pub fn snapshot(&self) -> SlideSnapshot<'_, T> {
        let state = self.scheduler.state();
        SlideSnapshot {
            current: self.current(),
            active_index: state.active_index,
            is_paused: state.is_paused,
            is_hovering: state.is_hovering,
            slide_count: self.slides.len(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::KeyCode;
    use folio_runtime::ManualClock;

    fn deck(len: usize) -> (SlideHost<String, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let slides: Vec<String> = (0..len).map(|i| format!("slide-{i}")).collect();
        let config = CarouselConfig::default().with_autoplay_interval(Duration::from_millis(2000));
        (SlideHost::with_clock(slides, &config, clock.clone()), clock)
    }

    #[test]
    fn go_to_slide_wraps() {
        let (mut host, _) = deck(4);
        assert!(host.go_to_slide(6));
        assert_eq!(host.current().map(String::as_str), Some("slide-2"));
        assert!(!host.go_to_slide(2));
    }

    #[test]
    fn autoplay_steps_one_slide() {
        let (mut host, clock) = deck(3);
        clock.advance_ms(2000);
        assert_eq!(host.tick(), 1);
        assert_eq!(host.snapshot().live_text(), "slide 2 of 3");
    }

    #[test]
    fn page_keys_move_one_slide() {
        let (mut host, _) = deck(5);
        assert!(host.handle_key(&KeyEvent::new(KeyCode::PageDown)));
        assert_eq!(host.state().active_index, 1);
        assert!(host.handle_key(&KeyEvent::new(KeyCode::PageUp)));
        assert_eq!(host.state().active_index, 0);
    }

    #[test]
    fn resize_is_ignored() {
        let (mut host, _) = deck(3);
        assert!(!host.handle_event(&Event::Resize { height_px: 900.0 }));
    }

    #[test]
    fn dots_mark_active() {
        let (mut host, _) = deck(3);
        host.next();
        let snap = host.snapshot();
        let dots: Vec<(usize, bool)> = snap.dots().collect();
        assert_eq!(dots, vec![(0, false), (1, true), (2, false)]);
    }

    #[test]
    fn empty_deck() {
        let (mut host, clock) = deck(0);
        assert!(host.current().is_none());
        assert!(!host.go_to_slide(3));
        clock.advance_ms(10_000);
        assert_eq!(host.tick(), 0);
        assert_eq!(host.snapshot().live_text(), "no slides");
    }

    #[test]
    fn hover_suspends_like_carousel() {
        let (mut host, clock) = deck(3);
        host.handle_event(&Event::PointerEnter);
        clock.advance_ms(6000);
        assert_eq!(host.tick(), 0);
        host.handle_event(&Event::PointerLeave);
        clock.advance_ms(2000);
        assert_eq!(host.tick(), 1);
    }
}
