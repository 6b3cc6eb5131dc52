#![forbid(unsafe_code)]

//! How many items fit in the carousel container.
//!
//! [`compute_visible_window`] turns a measured container height into a
//! [`VisibleWindow`]: a count of fully shown items plus an optional clipped
//! teaser below them. [`get_visible_slice`] then picks the items for that
//! window out of a [`DisplayOrder`], wrapping around its end.
//!
//! The height per item is an estimate, not a measurement of rendered items.
//!
//! # Policies
//!
//! The scheduler asks a [`WindowPolicy`] for the current window:
//!
//! | Policy | Window |
//! |--------|--------|
//! | [`SingleSlide`] | always one item, no teaser |
//! | [`HeightAdaptive`] | derived from the last measured container height |

use folio_runtime::CarouselConfig;

use crate::shuffle::DisplayOrder;

/// Upper bound on [`VisibleWindow::full_count`].
pub const MAX_FULL_COUNT: usize = 4096;

/// Items shown at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleWindow {
    /// Fully shown items. Never zero, at most [`MAX_FULL_COUNT`].
    pub full_count: usize,
    /// Whether a clipped teaser follows the full items.
    pub has_partial: bool,
}

impl VisibleWindow {
    /// One item, no teaser.
    pub const SINGLE: Self = Self {
        full_count: 1,
        has_partial: false,
    };

    /// Entries a slice for this window holds, teaser included.
    #[must_use]
    pub const fn entry_count(self) -> usize {
        self.full_count.saturating_add(self.has_partial as usize)
    }

    /// Pages needed to show `len` items `full_count` at a time.
    #[must_use]
    pub const fn page_count(self, len: usize) -> usize {
        len.div_ceil(self.full_count)
    }

    /// Page holding position `index`.
    #[must_use]
    pub const fn page_of(self, index: usize) -> usize {
        index / self.full_count
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Compute the visible window for a container.
///
/// `full_count = clamp(floor(container / avg), 1, MAX_FULL_COUNT)`, and the
/// teaser is shown when the height left below the full items reaches
/// `partial_threshold_px`.
/// Non-positive or non-finite heights yield [`VisibleWindow::SINGLE`].
#[must_use]
pub fn compute_visible_window(
    container_height_px: f64,
    avg_item_height_px: f64,
    partial_threshold_px: f64,
) -> VisibleWindow {
    if !container_height_px.is_finite()
        || !avg_item_height_px.is_finite()
        || container_height_px <= 0.0
        || avg_item_height_px <= 0.0
    {
        return VisibleWindow::SINGLE;
    }

    let fits = (container_height_px / avg_item_height_px).floor();
    let full_count = (fits.min(MAX_FULL_COUNT as f64) as usize).max(1);
    let remainder = container_height_px - full_count as f64 * avg_item_height_px;

    VisibleWindow {
        full_count,
        has_partial: remainder >= partial_threshold_px,
    }
}

/// One rendered entry of a visible slice.
#[derive(Debug, PartialEq)]
pub struct SliceEntry<'a, T> {
    /// The item to render.
    pub item: &'a T,
    /// Position in the display order, `(active + offset) mod N`.
    pub display_index: usize,
    /// Index into the item list.
    pub item_index: usize,
    /// Whether this is the clipped teaser.
    pub is_partial: bool,
}

impl<T> Clone for SliceEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceEntry<'_, T> {}

/// Items for `window`, starting at `active_index` in `order`.
///
/// Yields `full_count` entries then, if the window has a teaser, one partial
/// entry. Positions wrap modulo the order length, so a list shorter than the
/// window repeats items. An empty order yields an empty slice.
#[must_use]
pub fn get_visible_slice<'a, T>(
    order: &DisplayOrder,
    items: &'a [T],
    active_index: usize,
    window: VisibleWindow,
) -> Vec<SliceEntry<'a, T>> {
    let len = order.len();
    if len == 0 {
        return Vec::new();
    }

    let start = active_index % len;
    (0..window.entry_count())
        .filter_map(|offset| {
            let display_index = (start + offset) % len;
            let item_index = order.get(display_index)?;
            Some(SliceEntry {
                item: items.get(item_index)?,
                display_index,
                item_index,
                is_partial: offset >= window.full_count,
            })
        })
        .collect()
}

/// Strategy for the number of items the scheduler shows at once.
pub trait WindowPolicy {
    /// The current window.
    fn window(&self) -> VisibleWindow;
}

impl<P: WindowPolicy + ?Sized> WindowPolicy for &P {
    fn window(&self) -> VisibleWindow {
        (**self).window()
    }
}

/// One slide at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleSlide;

impl WindowPolicy for SingleSlide {
    fn window(&self) -> VisibleWindow {
        VisibleWindow::SINGLE
    }
}

/// Window derived from the measured container height.
///
/// Until a height is measured the window is [`VisibleWindow::SINGLE`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeightAdaptive {
    avg_item_height_px: f64,
    partial_threshold_px: f64,
    container_height_px: f64,
    window: VisibleWindow,
}

impl HeightAdaptive {
    /// Policy with explicit item height and teaser threshold.
    #[must_use]
    pub fn new(avg_item_height_px: f64, partial_threshold_px: f64) -> Self {
        Self {
            avg_item_height_px,
            partial_threshold_px,
            container_height_px: 0.0,
            window: VisibleWindow::SINGLE,
        }
    }

    /// Policy using the heights from `config`.
    #[must_use]
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.avg_item_height_px, config.partial_threshold_px)
    }

    /// Last measured container height.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container_height_px
    }

    /// Record a new container height. Returns `true` if the window changed.
    pub fn set_container_height(&mut self, height_px: f64) -> bool {
        self.container_height_px = height_px;
        let window = compute_visible_window(
            height_px,
            self.avg_item_height_px,
            self.partial_threshold_px,
        );
        let changed = window != self.window;
        self.window = window;
        changed
    }
}

impl WindowPolicy for HeightAdaptive {
    fn window(&self) -> VisibleWindow {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_below_threshold_has_no_teaser() {
        let window = compute_visible_window(650.0, 210.0, 50.0);
        assert_eq!(
            window,
            VisibleWindow {
                full_count: 3,
                has_partial: false
            }
        );
    }

    #[test]
    fn remainder_at_or_above_threshold_has_teaser() {
        let window = compute_visible_window(700.0, 210.0, 50.0);
        assert_eq!(window.full_count, 3);
        assert!(window.has_partial);
        // Exactly at the threshold counts.
        assert!(compute_visible_window(680.0, 210.0, 50.0).has_partial);
    }

    #[test]
    fn small_container_still_shows_one() {
        let window = compute_visible_window(100.0, 210.0, 50.0);
        assert_eq!(window.full_count, 1);
        assert!(!window.has_partial);
    }

    #[test]
    fn degenerate_inputs_fall_back_to_single() {
        for (container, avg) in [
            (0.0, 210.0),
            (-10.0, 210.0),
            (500.0, 0.0),
            (500.0, -1.0),
            (f64::NAN, 210.0),
            (f64::INFINITY, 210.0),
            (500.0, f64::NAN),
        ] {
            assert_eq!(
                compute_visible_window(container, avg, 50.0),
                VisibleWindow::SINGLE,
                "container={container} avg={avg}"
            );
        }
    }

    #[test]
    fn extreme_ratio_is_capped() {
        let window = compute_visible_window(f64::MAX, f64::MIN_POSITIVE, 0.0);
        assert_eq!(window.full_count, MAX_FULL_COUNT);
        assert!(window.has_partial);
        assert_eq!(window.entry_count(), MAX_FULL_COUNT + 1);

        let huge = VisibleWindow {
            full_count: usize::MAX,
            has_partial: true,
        };
        assert_eq!(huge.entry_count(), usize::MAX);
    }

    #[test]
    fn slice_wraps_and_marks_teaser() {
        let items = ["a", "b", "c", "d"];
        let order = DisplayOrder::from_indices(vec![2, 0, 3, 1]).expect("permutation");
        let window = VisibleWindow {
            full_count: 2,
            has_partial: true,
        };
        let slice = get_visible_slice(&order, &items, 3, window);
        let shown: Vec<(&str, usize, bool)> = slice
            .iter()
            .map(|e| (*e.item, e.display_index, e.is_partial))
            .collect();
        assert_eq!(shown, vec![("b", 3, false), ("c", 0, false), ("a", 1, true)]);
    }

    #[test]
    fn short_list_repeats_within_slice() {
        let items = ["x", "y"];
        let order = DisplayOrder::identity(2);
        let window = VisibleWindow {
            full_count: 3,
            has_partial: false,
        };
        let names: Vec<&str> = get_visible_slice(&order, &items, 1, window)
            .iter()
            .map(|e| *e.item)
            .collect();
        assert_eq!(names, vec!["y", "x", "y"]);
    }

    #[test]
    fn empty_order_yields_empty_slice() {
        let items: [&str; 0] = [];
        let slice = get_visible_slice(&DisplayOrder::default(), &items, 0, VisibleWindow::SINGLE);
        assert!(slice.is_empty());
    }

    #[test]
    fn page_math() {
        let window = VisibleWindow {
            full_count: 3,
            has_partial: false,
        };
        assert_eq!(window.page_count(0), 0);
        assert_eq!(window.page_count(4), 2);
        assert_eq!(window.page_count(6), 2);
        assert_eq!(window.page_of(5), 1);
    }

    #[test]
    fn height_adaptive_reports_changes() {
        let mut policy = HeightAdaptive::from_config(&CarouselConfig::default());
        assert_eq!(policy.window(), VisibleWindow::SINGLE);
        assert!(policy.set_container_height(650.0));
        assert_eq!(policy.window().full_count, 3);
        assert!(!policy.set_container_height(660.0));
        assert!(policy.set_container_height(700.0));
        assert!(policy.window().has_partial);
        assert_eq!(policy.container_height(), 700.0);
    }

    #[test]
    fn single_slide_is_constant() {
        assert_eq!(SingleSlide.window(), VisibleWindow::SINGLE);
    }
}
