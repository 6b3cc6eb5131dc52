#![forbid(unsafe_code)]

//! Author-aware shuffling.
//!
//! [`shuffle`] produces a [`DisplayOrder`]: a random permutation of item
//! indices in which no two neighbours share an author, including the pair
//! formed when the rotation wraps from the last item back to the first.
//!
//! # Algorithm
//!
//! 1. Uniform Fisher–Yates permutation.
//! 2. One repair pass, left to right. When `order[i]` repeats the author of
//!    `order[i - 1]`, the nearest later index whose author differs from both
//!    neighbours of `i` is swapped in. If no later candidate exists, the item
//!    is moved back into the nearest earlier gap whose two sides both differ
//!    from it. If neither exists the violation stays.
//! 3. Wrap fix: if the first and last items share an author and there are
//!    more than two distinct authors, the last item is swapped with the
//!    nearest interior item for which every touched pair stays valid.
//! 4. If the constraint is satisfiable but violations survive, the shuffled
//!    order is regrouped by author (largest group first, ties in shuffled
//!    order) and dealt onto even positions, then odd positions. That layout
//!    is valid whenever any valid layout exists.
//!
//! The input is never mutated and no step loops unboundedly.
//!
//! # Satisfiability
//!
//! With `n` items and `m` the size of the largest author group:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | one distinct author | unsatisfiable, any order accepted |
//! | `m <= n / 2` | no adjacent repeats, wrap pair included |
//! | `m <= (n + 1) / 2` | no adjacent repeats, wrap pair may repeat |
//! | otherwise | best effort |
//!
//! # Example
//!
//! ```
//! use folio_widgets::shuffle::shuffle_seeded;
//!
//! let authors = ["A", "A", "B", "B", "C"];
//! let order = shuffle_seeded(&authors, 7);
//! assert_eq!(order.len(), 5);
//! assert_eq!(order.violations(&authors, true), 0);
//! ```

use ahash::AHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::testimonial::Authored;

/// Ordered sequence of indices into an item list.
///
/// Always a bijection over `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DisplayOrder {
    indices: Vec<usize>,
}

impl DisplayOrder {
    /// The unshuffled order `0, 1, .., len - 1`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Wrap an explicit permutation. Returns `None` unless `indices` is a
    /// bijection over `0..indices.len()`.
    #[must_use]
    pub fn from_indices(indices: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; indices.len()];
        for &idx in &indices {
            let slot = seen.get_mut(idx)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self { indices })
    }

    /// Number of positions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the order is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Item index shown at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Item index at `position` taken modulo the length.
    #[must_use]
    pub fn get_wrapped(&self, position: usize) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        Some(self.indices[position % self.indices.len()])
    }

    /// The underlying indices.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate item indices in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Count neighbouring positions whose items share an author.
    ///
    /// With `wrap`, the last-to-first pair is counted too (only when there
    /// are more than two positions; with two it is the same pair).
    #[must_use]
    pub fn violations<T: Authored>(&self, items: &[T], wrap: bool) -> usize {
        count_violations(&self.indices, items, wrap)
    }
}

impl From<DisplayOrder> for Vec<usize> {
    fn from(order: DisplayOrder) -> Self {
        order.indices
    }
}

/// How far the no-adjacent-author rule can be honoured for an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Valid around the wrap as well.
    Circular,
    /// Valid as a line; the wrap pair may repeat.
    Linear,
    /// No valid order exists.
    Unsatisfiable,
}

/// Author distribution of an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorStats {
    /// Number of items.
    pub len: usize,
    /// Number of distinct authors.
    pub distinct: usize,
    /// Size of the largest author group.
    pub max_group: usize,
}

impl AuthorStats {
    /// Tally authors.
    #[must_use]
    pub fn of<T: Authored>(items: &[T]) -> Self {
        let mut counts: AHashMap<&str, usize> = AHashMap::with_capacity(items.len());
        for item in items {
            *counts.entry(item.author()).or_insert(0) += 1;
        }
        Self {
            len: items.len(),
            distinct: counts.len(),
            max_group: counts.values().copied().max().unwrap_or(0),
        }
    }

    /// Which guarantee a shuffle can give for this distribution.
    #[must_use]
    pub fn feasibility(&self) -> Feasibility {
        if self.len <= 1 {
            return Feasibility::Circular;
        }
        if self.distinct <= 1 {
            return Feasibility::Unsatisfiable;
        }
        if self.max_group <= self.len / 2 {
            Feasibility::Circular
        } else if self.max_group <= self.len.div_ceil(2) {
            Feasibility::Linear
        } else {
            Feasibility::Unsatisfiable
        }
    }
}

/// Shuffle `items` into a display order using `rng`.
pub fn shuffle<T: Authored, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> DisplayOrder {
    let n = items.len();
    let mut order: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return DisplayOrder { indices: order };
    }

    order.shuffle(rng);
    let stats = AuthorStats::of(items);
    if stats.distinct <= 1 {
        return DisplayOrder { indices: order };
    }

    repair_adjacent(&mut order, items);
    if n > 2 && stats.distinct > 2 {
        repair_wrap(&mut order, items);
    }

    let regroup = match stats.feasibility() {
        Feasibility::Circular => count_violations(&order, items, true) > 0,
        Feasibility::Linear => count_violations(&order, items, false) > 0,
        Feasibility::Unsatisfiable => false,
    };
    if regroup {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "shuffle.regroup",
            len = n,
            distinct = stats.distinct,
            max_group = stats.max_group
        );
        order = deal_by_author(&order, items);
    }

    DisplayOrder { indices: order }
}

/// Shuffle with a seeded [`SmallRng`]; same seed, same order.
#[must_use]
pub fn shuffle_seeded<T: Authored>(items: &[T], seed: u64) -> DisplayOrder {
    let mut rng = SmallRng::seed_from_u64(seed);
    shuffle(items, &mut rng)
}

fn author_at<'a, T: Authored>(order: &[usize], items: &'a [T], pos: usize) -> &'a str {
    items[order[pos]].author()
}

fn count_violations<T: Authored>(order: &[usize], items: &[T], wrap: bool) -> usize {
    let n = order.len();
    let mut count = order
        .windows(2)
        .filter(|pair| items[pair[0]].author() == items[pair[1]].author())
        .count();
    if wrap && n > 2 && author_at(order, items, 0) == author_at(order, items, n - 1) {
        count += 1;
    }
    count
}

fn repair_adjacent<T: Authored>(order: &mut Vec<usize>, items: &[T]) {
    let n = order.len();
    for i in 1..n {
        let prev = author_at(order, items, i - 1);
        if author_at(order, items, i) != prev {
            continue;
        }
        let next = (i + 1 < n).then(|| author_at(order, items, i + 1));

        let forward = (i + 1..n).find(|&j| {
            let candidate = author_at(order, items, j);
            candidate != prev && (j == i + 1 || next.is_none_or(|next| candidate != next))
        });
        if let Some(j) = forward {
            order.swap(i, j);
            continue;
        }

        let moving = author_at(order, items, i);
        let gap = (0..i).rev().find(|&p| {
            author_at(order, items, p) != moving
                && (p == 0 || author_at(order, items, p - 1) != moving)
        });
        if let Some(p) = gap {
            let idx = order.remove(i);
            order.insert(p, idx);
        }
    }
}

fn repair_wrap<T: Authored>(order: &mut [usize], items: &[T]) {
    let n = order.len();
    let last = n - 1;
    if author_at(order, items, 0) != author_at(order, items, last) {
        return;
    }
    for k in (1..last).rev() {
        order.swap(k, last);
        if touched_pairs_valid(order, items, &[k, last]) {
            return;
        }
        order.swap(k, last);
    }
}

fn touched_pairs_valid<T: Authored>(order: &[usize], items: &[T], positions: &[usize]) -> bool {
    let n = order.len();
    let pair_ok = |a: usize, b: usize| author_at(order, items, a) != author_at(order, items, b);
    positions.iter().all(|&pos| {
        (pos == 0 || pair_ok(pos - 1, pos))
            && (pos + 1 >= n || pair_ok(pos, pos + 1))
            && (pos != n - 1 || pair_ok(n - 1, 0))
    })
}

fn deal_by_author<T: Authored>(order: &[usize], items: &[T]) -> Vec<usize> {
    let mut slot_of: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &idx in order {
        let author = items[idx].author();
        let slot = *slot_of.entry(author).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(idx);
    }
    // Stable: equal-sized groups keep their shuffled order.
    groups.sort_by(|a, b| b.len().cmp(&a.len()));

    let n = order.len();
    let positions = (0..n).step_by(2).chain((1..n).step_by(2));
    let mut dealt = vec![0; n];
    for (pos, idx) in positions.zip(groups.into_iter().flatten()) {
        dealt[pos] = idx;
    }
    dealt
}
