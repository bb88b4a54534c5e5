// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated virtualized list used as a [`ListHost`] in integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use core::future::{Future, ready};

use understory_scroll_estimate::{ListHost, ListLayout, VisibleItem};

/// Number of items in the size profiles.
pub const ITEM_COUNT: usize = 50;

/// Every item 30 units tall.
pub fn fixed() -> Vec<f64> {
    vec![30.0; ITEM_COUNT]
}

/// Item `i` is `(i + 1) * 5` units tall.
pub fn growing() -> Vec<f64> {
    (0..ITEM_COUNT).map(|i| ((i + 1) * 5) as f64).collect()
}

/// The reverse of [`growing`].
pub fn shrinking() -> Vec<f64> {
    let mut sizes = growing();
    sizes.reverse();
    sizes
}

/// A list that lays out `sizes` back to back and realizes whatever
/// intersects the viewport.
#[derive(Debug)]
pub struct SimulatedList {
    sizes: Vec<f64>,
    starts: Vec<f64>,
    viewport: f64,
    scroll: f64,
    visible: Vec<VisibleItem<f64>>,
    disposed: bool,
}

impl SimulatedList {
    pub fn new(sizes: Vec<f64>, viewport: f64) -> Self {
        let mut starts = Vec::with_capacity(sizes.len());
        let mut acc = 0.0;
        for size in &sizes {
            starts.push(acc);
            acc += size;
        }
        let mut list = Self {
            sizes,
            starts,
            viewport,
            scroll: 0.0,
            visible: Vec::new(),
            disposed: false,
        };
        list.relayout();
        list
    }

    /// Exact content extent.
    pub fn total_extent(&self) -> f64 {
        self.sizes.iter().sum()
    }

    /// Exact maximum scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.total_extent() - self.viewport).max(0.0)
    }

    /// Exact current scroll offset.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Exact sum of the sizes of items `first..=last`.
    pub fn sum_of(&self, first: usize, last: usize) -> f64 {
        self.sizes[first..=last].iter().sum()
    }

    /// Jumps directly to `offset`, clamped to the scrollable range.
    pub fn jump_to(&mut self, offset: f64) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
        self.relayout();
    }

    /// Removes every item in place, keeping the viewport.
    pub fn clear_items(&mut self) {
        self.sizes.clear();
        self.starts.clear();
        self.scroll = 0.0;
        self.relayout();
    }

    /// Marks the list as torn down; pending and future scrolls become no-ops.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    fn relayout(&mut self) {
        let (top, bottom) = (self.scroll, self.scroll + self.viewport);
        self.visible = self
            .sizes
            .iter()
            .zip(&self.starts)
            .enumerate()
            .filter(|(_, (size, start))| **start < bottom && **start + **size > top)
            .map(|(index, (size, start))| VisibleItem::new(index, *size, *start - self.scroll))
            .collect();
    }
}

impl ListHost for SimulatedList {
    type Scalar = f64;

    fn layout(&self) -> ListLayout<'_, f64> {
        ListLayout::new(&self.visible, 0.0, self.viewport, self.sizes.len())
    }

    fn scroll_by(&mut self, delta: f64) -> impl Future<Output = f64> {
        if self.disposed {
            return ready(0.0);
        }
        let before = self.scroll;
        self.jump_to(before + delta);
        ready(self.scroll - before)
    }
}

/// Asserts two floats are within `1e-6` of each other.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
