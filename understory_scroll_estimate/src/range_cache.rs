// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache of measured sizes for item ranges that have scrolled out of view.
//!
//! A virtualized list only knows the sizes of the items it currently realizes.
//! [`RangeCache`] remembers what it saw before: every time the visible window
//! moves, the previous window's aggregate size is folded in as a
//! [`RangeEntry`], and whatever part of the cache the new window re-enters is
//! evicted, since those items are measured live again.
//!
//! Entries only store `(range, summed size)`. Per-item sizes inside a cached
//! range are not retained; [`RangeEntry::mean_size`] gives the local mean.
//!
//! Between calls the entries are:
//!
//! - sorted ascending by `range.first`,
//! - pairwise disjoint and disjoint from the last visible range,
//! - never index-contiguous (such neighbors are merged),
//! - of non-negative size.
//!
//! # Storage
//!
//! Entries live in a sorted `SmallVec` with binary-search insertion. The number
//! of distinct hidden ranges grows with scroll-direction reversals and jumps,
//! not with list length, so it stays small in practice.

use smallvec::SmallVec;

use crate::{CacheTrace, IndexRange, Scalar, VisibleWindow};

/// Inline capacity for cached entries.
const INLINE_CAPACITY: usize = 8;

/// Summed measured size of a contiguous range of hidden items.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangeEntry<S> {
    /// Items covered by this entry.
    pub range: IndexRange,
    /// Sum of the sizes of all items in `range`, as last measured.
    pub size: S,
}

impl<S: Scalar> RangeEntry<S> {
    /// Creates an entry.
    #[must_use]
    pub const fn new(range: IndexRange, size: S) -> Self {
        Self { range, size }
    }

    /// Mean size of an item inside this entry.
    #[must_use]
    pub fn mean_size(&self) -> S {
        self.size / S::from_usize(self.range.len().max(1))
    }
}

/// Sorted, compact set of measured-but-hidden item ranges.
///
/// See the [module documentation](self) for the invariants it maintains.
///
/// ```rust
/// use understory_scroll_estimate::{IndexRange, RangeCache, VisibleItem, VisibleWindow};
///
/// let mut cache = RangeCache::<f32>::new();
///
/// // Items 0..=4 are on screen, 10 units each.
/// let first: Vec<_> = (0..5).map(|i| VisibleItem::new(i, 10.0, i as f32 * 10.0)).collect();
/// cache.reconcile(&VisibleWindow::new(&first).unwrap());
/// assert!(cache.is_empty());
///
/// // Scroll one screen down: the old window becomes a cached entry.
/// let second: Vec<_> = (5..10).map(|i| VisibleItem::new(i, 10.0, (i - 5) as f32 * 10.0)).collect();
/// cache.reconcile(&VisibleWindow::new(&second).unwrap());
/// assert_eq!(cache.entries().len(), 1);
/// assert_eq!(cache.entries()[0].range, IndexRange::new(0, 4));
/// assert_eq!(cache.entries()[0].size, 50.0);
/// ```
#[derive(Clone, Debug)]
pub struct RangeCache<S> {
    entries: SmallVec<[RangeEntry<S>; INLINE_CAPACITY]>,
    /// Visible range and its aggregate size as of the latest reconcile.
    previous: Option<RangeEntry<S>>,
}

impl<S: Scalar> Default for RangeCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> RangeCache<S> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            previous: None,
        }
    }

    /// Cached entries, sorted by start index.
    #[must_use]
    pub fn entries(&self) -> &[RangeEntry<S>] {
        &self.entries
    }

    /// Returns `true` if no ranges are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Visible range observed by the latest reconcile, if any.
    #[must_use]
    pub fn previous_range(&self) -> Option<IndexRange> {
        self.previous.map(|p| p.range)
    }

    /// Sum of all cached sizes.
    #[must_use]
    pub fn known_size(&self) -> S {
        S::sum(self.entries.iter().map(|e| e.size))
    }

    /// Number of items covered by cached entries.
    #[must_use]
    pub fn known_items(&self) -> usize {
        self.entries.iter().map(|e| e.range.len()).sum()
    }

    /// Entries lying entirely before `index`.
    #[must_use]
    pub fn entries_before(&self, index: usize) -> &[RangeEntry<S>] {
        let end = self.entries.partition_point(|e| e.range.last < index);
        &self.entries[..end]
    }

    /// The cached entry containing `index`, if any.
    #[must_use]
    pub fn entry_containing(&self, index: usize) -> Option<&RangeEntry<S>> {
        let i = self.entries.partition_point(|e| e.range.last < index);
        self.entries.get(i).filter(|e| e.range.contains(index))
    }

    /// Drops all entries and forgets the previous window.
    ///
    /// Call this when the list becomes empty or its content is replaced.
    pub fn clear(&mut self) {
        self.clear_with_trace(&mut ());
    }

    /// Like [`clear`](Self::clear), reporting to `trace`.
    pub fn clear_with_trace(&mut self, trace: &mut impl CacheTrace<S>) {
        if !self.entries.is_empty() {
            trace.cleared(self.entries.len());
        }
        self.entries.clear();
        self.previous = None;
    }

    /// Folds the previous window into the cache and evicts the current one.
    ///
    /// Does structural work only when `window`'s range differs from the range
    /// seen by the previous call; otherwise it just refreshes the stored
    /// aggregate size of the window.
    ///
    /// # Panics
    ///
    /// Panics if the previous window is already cached at its start index.
    /// That can only happen if the cache was mutated inconsistently.
    pub fn reconcile(&mut self, window: &VisibleWindow<'_, S>) {
        self.reconcile_with_trace(window, &mut ());
    }

    /// Like [`reconcile`](Self::reconcile), reporting each step to `trace`.
    pub fn reconcile_with_trace(
        &mut self,
        window: &VisibleWindow<'_, S>,
        trace: &mut impl CacheTrace<S>,
    ) {
        let visible = window.range();
        let current = RangeEntry::new(visible, window.total_size());

        let previous = match self.previous {
            Some(previous) if previous.range == visible => {
                self.previous = Some(current);
                return;
            }
            previous => previous,
        };

        self.evict(window, trace);

        if let Some(previous) = previous {
            let slot = self
                .entries
                .binary_search_by_key(&previous.range.first, |e| e.range.first);
            let Err(slot) = slot else {
                panic!(
                    "previously visible range {:?} is already cached: {:?}",
                    previous.range, self.entries
                );
            };
            self.entries.insert(slot, previous);
            trace.inserted(previous);

            // When scrolling by less than a screen the old window overlaps
            // the new one.
            self.evict(window, trace);
        }

        self.merge_adjacent(trace);
        self.previous = Some(current);

        #[cfg(debug_assertions)]
        self.debug_assert_invariants();
    }

    /// Removes every entry overlapping the visible range, re-inserting the
    /// non-visible remainders with the size left after subtracting the live
    /// visible sizes.
    fn evict(&mut self, window: &VisibleWindow<'_, S>, trace: &mut impl CacheTrace<S>) {
        let visible = window.range();
        let mut i = self.entries.partition_point(|e| e.range.last < visible.first);

        while i < self.entries.len() {
            let entry = self.entries[i];
            if visible.last < entry.range.first {
                break;
            }

            self.entries.remove(i);
            let trimmed = window.size_within(&entry.range);
            trace.evicted(entry, trimmed);

            let (top, bottom) = entry.range.split_around(&visible);
            let remaining = entry.size - trimmed;
            if remaining <= S::zero() {
                trace.remainder_dropped(top.union(&bottom), remaining);
                continue;
            }

            let (top_len, bottom_len) = (top.len(), bottom.len());
            if top_len + bottom_len == 0 {
                continue;
            }
            let top_size = remaining * S::from_usize(top_len) / S::from_usize(top_len + bottom_len);
            let bottom_size = remaining - top_size;

            for part in [
                RangeEntry::new(top, top_size),
                RangeEntry::new(bottom, bottom_size),
            ] {
                if part.range.is_empty() || part.size <= S::zero() {
                    continue;
                }
                self.entries.insert(i, part);
                trace.split(part);
                i += 1;
            }
        }
    }

    /// Merges index-contiguous neighbors in a single left-to-right pass.
    fn merge_adjacent(&mut self, trace: &mut impl CacheTrace<S>) {
        let mut i = 0;
        while i + 1 < self.entries.len() {
            let (left, right) = (self.entries[i], self.entries[i + 1]);
            if left.range.is_followed_by(&right.range) {
                let merged =
                    RangeEntry::new(left.range.union(&right.range), left.size + right.size);
                self.entries[i] = merged;
                self.entries.remove(i + 1);
                trace.merged(merged);
            } else {
                i += 1;
            }
        }
    }

    /// Returns `true` if the cache satisfies all of its structural invariants.
    ///
    /// This is always true after a public call returns; it exists for tests
    /// and for hosts that want to verify a cache they have deserialized or
    /// otherwise rebuilt.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        let visible = self.previous_range().unwrap_or(IndexRange::EMPTY);
        let entries_ok = self
            .entries
            .iter()
            .all(|e| !e.range.is_empty() && e.size >= S::zero() && !e.range.overlaps(&visible));
        let pairs_ok = self.entries.windows(2).all(|w| {
            w[0].range.last < w[1].range.first && !w[0].range.is_followed_by(&w[1].range)
        });
        entries_ok && pairs_ok
    }

    #[cfg(debug_assertions)]
    fn debug_assert_invariants(&self) {
        debug_assert!(
            self.check_invariants(),
            "range cache invariants violated: {:?} (visible {:?})",
            self.entries,
            self.previous_range()
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{RangeCache, RangeEntry};
    use crate::{CacheEvent, CacheEventLog, IndexRange, VisibleItem, VisibleWindow};

    fn uniform(first: usize, last: usize, size: f64) -> Vec<VisibleItem<f64>> {
        (first..=last)
            .map(|i| VisibleItem::new(i, size, (i - first) as f64 * size))
            .collect()
    }

    fn reconcile(cache: &mut RangeCache<f64>, items: &[VisibleItem<f64>]) {
        cache.reconcile(&VisibleWindow::new(items).unwrap());
        assert!(cache.check_invariants(), "invariants broken: {cache:?}");
    }

    #[test]
    fn first_window_caches_nothing() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        assert!(cache.is_empty(), "nothing has scrolled away yet");
        assert_eq!(cache.previous_range(), Some(IndexRange::new(0, 4)));
    }

    #[test]
    fn scrolling_a_full_screen_caches_previous_window() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        reconcile(&mut cache, &uniform(5, 9, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 4), 50.0)]
        );
        assert_eq!(cache.known_items(), 5);
        assert_eq!(cache.known_size(), 50.0);
    }

    #[test]
    fn eviction_splits_proportionally_around_visible_range() {
        let mut cache = RangeCache::new();
        // Seed ([0, 9], 100) by showing [0, 9] then jumping away.
        reconcile(&mut cache, &uniform(0, 9, 10.0));
        reconcile(&mut cache, &uniform(20, 24, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 9), 100.0)]
        );

        // Jump into the middle of the cached range with different live sizes.
        let mut log = CacheEventLog::new();
        let live = uniform(3, 6, 8.0);
        cache.reconcile_with_trace(&VisibleWindow::new(&live).unwrap(), &mut log);

        assert_eq!(
            cache.entries(),
            &[
                RangeEntry::new(IndexRange::new(0, 2), 34.0),
                RangeEntry::new(IndexRange::new(7, 9), 34.0),
                RangeEntry::new(IndexRange::new(20, 24), 50.0),
            ]
        );
        let evicted = CacheEvent::Evicted {
            entry: RangeEntry::new(IndexRange::new(0, 9), 100.0),
            trimmed: 32.0,
        };
        assert!(
            log.events().contains(&evicted),
            "missing eviction in {:?}",
            log.events()
        );
    }

    #[test]
    fn uneven_remainders_get_length_weighted_sizes() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 9, 10.0));
        reconcile(&mut cache, &uniform(30, 31, 10.0));

        // Visible [2, 3]: top [0, 1] (2 items), bottom [4, 9] (6 items).
        reconcile(&mut cache, &uniform(2, 3, 10.0));
        let entries = cache.entries();
        assert_eq!(entries[0], RangeEntry::new(IndexRange::new(0, 1), 20.0));
        assert_eq!(entries[1], RangeEntry::new(IndexRange::new(4, 9), 60.0));
    }

    #[test]
    fn partial_scroll_trims_overlap_and_keeps_order() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        // Scroll by two items: [0, 4] is folded in, then [2, 4] is evicted.
        reconcile(&mut cache, &uniform(2, 6, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 1), 20.0)]
        );

        reconcile(&mut cache, &uniform(4, 8, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 3), 40.0)]
        );
    }

    #[test]
    fn non_positive_remainder_is_dropped() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 1.0));
        reconcile(&mut cache, &uniform(10, 12, 1.0));

        // Items grew a lot since they were cached: the live part alone
        // exceeds the whole cached sum.
        let mut log = CacheEventLog::new();
        let live = uniform(1, 3, 50.0);
        cache.reconcile_with_trace(&VisibleWindow::new(&live).unwrap(), &mut log);

        assert!(
            cache.entries().iter().all(|e| e.range.first >= 10),
            "stale entry survived: {cache:?}"
        );
        assert!(
            log.events().iter().any(|e| matches!(
                e,
                CacheEvent::RemainderDropped { remaining, .. } if *remaining < 0.0
            )),
            "negative remainder not reported: {:?}",
            log.events()
        );
    }

    #[test]
    fn zero_size_window_is_cached_and_later_dropped() {
        let mut cache = RangeCache::new();
        // Collapsed rows measure zero but are still known.
        reconcile(&mut cache, &uniform(0, 2, 0.0));
        reconcile(&mut cache, &uniform(5, 7, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 2), 0.0)]
        );
        assert_eq!(cache.known_items(), 3);

        // Re-entering it leaves nothing worth keeping.
        let mut log = CacheEventLog::new();
        let back = uniform(1, 3, 0.0);
        cache.reconcile_with_trace(&VisibleWindow::new(&back).unwrap(), &mut log);
        assert!(cache.check_invariants(), "invariants broken: {cache:?}");
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(5, 7), 30.0)]
        );
        let dropped = CacheEvent::RemainderDropped {
            range: IndexRange::single(0),
            remaining: 0.0,
        };
        assert!(
            log.events().contains(&dropped),
            "zero remainder should be reported: {:?}",
            log.events()
        );
    }

    #[test]
    fn same_range_twice_is_a_no_op() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        reconcile(&mut cache, &uniform(5, 9, 10.0));
        let before = cache.entries().to_vec();

        let mut log = CacheEventLog::new();
        let again = uniform(5, 9, 10.0);
        cache.reconcile_with_trace(&VisibleWindow::new(&again).unwrap(), &mut log);
        assert_eq!(cache.entries(), before.as_slice());
        assert!(log.events().is_empty(), "unexpected events {:?}", log.events());
    }

    #[test]
    fn latest_size_of_unchanged_window_is_what_gets_cached() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        // Same range re-measured with different sizes (e.g. images loaded).
        reconcile(&mut cache, &uniform(0, 4, 12.0));
        reconcile(&mut cache, &uniform(5, 9, 10.0));
        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 4), 60.0)]
        );
    }

    #[test]
    fn contiguous_entries_merge() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        reconcile(&mut cache, &uniform(5, 9, 10.0));
        let mut log = CacheEventLog::new();
        let third = uniform(10, 14, 10.0);
        cache.reconcile_with_trace(&VisibleWindow::new(&third).unwrap(), &mut log);

        assert_eq!(
            cache.entries(),
            &[RangeEntry::new(IndexRange::new(0, 9), 100.0)]
        );
        assert_eq!(
            log.events().last(),
            Some(&CacheEvent::Merged(RangeEntry::new(
                IndexRange::new(0, 9),
                100.0
            )))
        );
    }

    #[test]
    fn lookup_helpers() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        reconcile(&mut cache, &uniform(10, 14, 10.0));
        reconcile(&mut cache, &uniform(20, 24, 10.0));

        assert_eq!(cache.entries_before(10).len(), 1);
        assert_eq!(cache.entries_before(15).len(), 2);
        assert_eq!(
            cache.entry_containing(12).map(|e| e.range),
            Some(IndexRange::new(10, 14))
        );
        assert!(cache.entry_containing(7).is_none(), "7 lies in a gap");
        assert_eq!(cache.entries()[0].mean_size(), 10.0);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = RangeCache::new();
        reconcile(&mut cache, &uniform(0, 4, 10.0));
        reconcile(&mut cache, &uniform(5, 9, 10.0));

        let mut log = CacheEventLog::new();
        cache.clear_with_trace(&mut log);
        assert!(cache.is_empty(), "clear kept {cache:?}");
        assert_eq!(cache.previous_range(), None);
        assert_eq!(log.events(), &[CacheEvent::Cleared(1)]);

        // Starting over behaves like a fresh cache.
        reconcile(&mut cache, &uniform(30, 34, 10.0));
        assert!(cache.is_empty(), "fresh start should cache nothing");
    }
}
