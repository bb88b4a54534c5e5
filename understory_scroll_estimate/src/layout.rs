// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass layout snapshots reported by the host list.

use crate::{IndexRange, Scalar};

/// One realized item as measured by the host's layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibleItem<S> {
    /// Index of the item in the list.
    pub index: usize,
    /// Measured extent of the item along the scroll axis.
    pub size: S,
    /// Position of the item's leading edge, in the same space as the viewport offsets.
    pub offset: S,
}

impl<S> VisibleItem<S> {
    /// Creates a measured item.
    #[must_use]
    pub const fn new(index: usize, size: S, offset: S) -> Self {
        Self {
            index,
            size,
            offset,
        }
    }
}

/// What the host list reports after a layout pass.
///
/// `items` must be sorted ascending by index. Gaps between indices are allowed.
#[derive(Copy, Clone, Debug)]
pub struct ListLayout<'a, S> {
    /// Items currently realized, ascending by index.
    pub items: &'a [VisibleItem<S>],
    /// Leading edge of the viewport.
    pub viewport_start: S,
    /// Trailing edge of the viewport.
    pub viewport_end: S,
    /// Number of items in the list, realized or not.
    pub total_items: usize,
}

impl<'a, S: Scalar> ListLayout<'a, S> {
    /// Creates a layout snapshot.
    #[must_use]
    pub fn new(
        items: &'a [VisibleItem<S>],
        viewport_start: S,
        viewport_end: S,
        total_items: usize,
    ) -> Self {
        Self {
            items,
            viewport_start,
            viewport_end,
            total_items,
        }
    }

    /// Extent of the viewport, `viewport_end - viewport_start`.
    #[must_use]
    pub fn viewport_extent(&self) -> S {
        self.viewport_end - self.viewport_start
    }

    /// Returns the visible window, or `None` when nothing is realized.
    #[must_use]
    pub fn visible_window(&self) -> Option<VisibleWindow<'a, S>> {
        VisibleWindow::new(self.items)
    }
}

/// A non-empty run of measured items.
///
/// This is the only input [`RangeCache::reconcile`](crate::RangeCache::reconcile)
/// accepts, so an empty window can never reach the cache.
#[derive(Copy, Clone, Debug)]
pub struct VisibleWindow<'a, S> {
    items: &'a [VisibleItem<S>],
    range: IndexRange,
}

impl<'a, S: Scalar> VisibleWindow<'a, S> {
    /// Wraps `items`, returning `None` if the slice is empty.
    ///
    /// Items must be sorted ascending by index.
    #[must_use]
    pub fn new(items: &'a [VisibleItem<S>]) -> Option<Self> {
        let (first, last) = (items.first()?, items.last()?);
        debug_assert!(
            items.windows(2).all(|w| w[0].index < w[1].index),
            "visible items must be strictly ascending by index"
        );
        Some(Self {
            items,
            range: IndexRange::new(first.index, last.index),
        })
    }

    /// Index span from the first to the last realized item.
    #[must_use]
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// The realized items.
    #[must_use]
    pub fn items(&self) -> &'a [VisibleItem<S>] {
        self.items
    }

    /// The first realized item.
    #[must_use]
    pub fn first(&self) -> &'a VisibleItem<S> {
        &self.items[0]
    }

    /// Number of realized items (not the span of [`range`](Self::range)).
    #[must_use]
    #[expect(
        clippy::len_without_is_empty,
        reason = "a window always holds at least one item"
    )]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of all realized item sizes.
    #[must_use]
    pub fn total_size(&self) -> S {
        S::sum(self.items.iter().map(|item| item.size))
    }

    /// Sum of the sizes of realized items whose index falls inside `range`.
    #[must_use]
    pub fn size_within(&self, range: &IndexRange) -> S {
        if range.is_empty() {
            return S::zero();
        }
        let start = self.items.partition_point(|item| item.index < range.first);
        let end = self.items.partition_point(|item| item.index <= range.last);
        S::sum(self.items[start..end.max(start)].iter().map(|item| item.size))
    }

    /// Returns the realized item with `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&'a VisibleItem<S>> {
        self.items
            .binary_search_by_key(&index, |item| item.index)
            .ok()
            .map(|i| &self.items[i])
    }
}
