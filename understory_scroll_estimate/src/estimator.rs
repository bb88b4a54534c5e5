// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mean-size extrapolation over visible and cached measurements.

use crate::{ListLayout, RangeCache, Scalar, VisibleWindow};

/// The numbers a scrollbar needs for one layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate<S> {
    /// Mean size over every item whose size is known.
    pub mean_item_size: S,
    /// Estimated extent of the whole list, `mean_item_size * total_items`.
    pub total_extent: S,
    /// Estimated content-space position of the viewport's leading edge:
    /// the distance to the first visible item's leading edge plus however far
    /// that item has scrolled past the viewport start.
    pub offset_above_first_visible: S,
}

impl<S: Scalar> Estimate<S> {
    /// `total_extent - viewport_extent`.
    ///
    /// Negative when the content is shorter than the viewport; callers clamp.
    #[must_use]
    pub fn max_scroll_offset(&self, viewport_extent: S) -> S {
        self.total_extent - viewport_extent
    }
}

/// Estimates sizes and offsets for a list where only some items are measured.
///
/// Items that have never been measured are assumed to have the mean size of
/// the items that have. Two flavors exist:
///
/// - [`SizeEstimator::new`] combines the visible window with a [`RangeCache`]
///   of previously seen ranges.
/// - [`SizeEstimator::visible_only`] uses only the visible window. It needs
///   no state, so it works on the very first layout pass, but it drifts as
///   soon as item sizes vary across the list.
#[derive(Copy, Clone, Debug)]
pub struct SizeEstimator<'a, S> {
    layout: ListLayout<'a, S>,
    window: VisibleWindow<'a, S>,
    cache: Option<&'a RangeCache<S>>,
    mean: S,
}

impl<'a, S: Scalar> SizeEstimator<'a, S> {
    /// Estimator over the visible window plus `cache`.
    ///
    /// Returns `None` if `layout` has no visible items. The cache is expected
    /// to have been reconciled against this layout already.
    #[must_use]
    pub fn new(layout: &ListLayout<'a, S>, cache: &'a RangeCache<S>) -> Option<Self> {
        let window = layout.visible_window()?;
        let known_size = window.total_size() + cache.known_size();
        let known_items = window.len() + cache.known_items();
        Some(Self {
            layout: *layout,
            window,
            cache: Some(cache),
            mean: known_size / S::from_usize(known_items),
        })
    }

    /// Estimator over the visible window alone.
    ///
    /// Returns `None` if `layout` has no visible items.
    #[must_use]
    pub fn visible_only(layout: &ListLayout<'a, S>) -> Option<Self> {
        let window = layout.visible_window()?;
        Some(Self {
            layout: *layout,
            window,
            cache: None,
            mean: window.total_size() / S::from_usize(window.len()),
        })
    }

    /// The visible window the estimate is based on.
    #[must_use]
    pub fn window(&self) -> &VisibleWindow<'a, S> {
        &self.window
    }

    /// Mean size over all known items.
    #[must_use]
    pub fn mean_item_size(&self) -> S {
        self.mean
    }

    /// Estimated extent of the whole list.
    #[must_use]
    pub fn total_extent(&self) -> S {
        self.mean * S::from_usize(self.layout.total_items)
    }

    /// Estimated distance from the start of the content to the leading edge
    /// of item `index`.
    ///
    /// Realized items are placed by their live offsets relative to the first
    /// visible item. Other items sum whatever is known before them (cached
    /// ranges, using a cached range's local mean when `index` falls inside
    /// it, and realized items) and fill the remaining gap with the mean size.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> S {
        let first = self.window.first();
        if index != first.index
            && let Some(item) = self.window.item(index)
        {
            return self.offset_of(first.index) + (item.offset - first.offset);
        }

        let mut known_size = S::zero();
        let mut known_items = 0_usize;

        if let Some(cache) = self.cache {
            for entry in cache.entries_before(index) {
                known_size = known_size + entry.size;
                known_items += entry.range.len();
            }
            if let Some(entry) = cache.entry_containing(index) {
                let partial = index - entry.range.first;
                known_size = known_size + entry.mean_size() * S::from_usize(partial);
                known_items += partial;
            }
        }

        for item in self.window.items().iter().take_while(|item| item.index < index) {
            known_size = known_size + item.size;
            known_items += 1;
        }

        let unknown = index.saturating_sub(known_items);
        known_size + self.mean * S::from_usize(unknown)
    }

    /// Estimated content-space position of the viewport's leading edge.
    ///
    /// This is the distance to the first visible item plus
    /// `viewport_start - first.offset`, which is negative when the first item
    /// starts below the viewport edge.
    #[must_use]
    pub fn offset_above_first_visible(&self) -> S {
        let first = self.window.first();
        self.offset_of(first.index) + (self.layout.viewport_start - first.offset)
    }

    /// All estimates for this pass.
    #[must_use]
    pub fn estimate(&self) -> Estimate<S> {
        Estimate {
            mean_item_size: self.mean_item_size(),
            total_extent: self.total_extent(),
            offset_above_first_visible: self.offset_above_first_visible(),
        }
    }
}
