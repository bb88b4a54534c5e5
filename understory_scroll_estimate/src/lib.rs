// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_estimate --heading-base-level=0

//! Understory Scroll Estimate: scrollbars for lists that never measure all their items.
//!
//! A virtualized list realizes only the items on screen. When items have
//! different, unknown-in-advance sizes, neither the total content extent nor
//! the scroll offset is known exactly, yet a scrollbar needs both. This crate
//! estimates them from what has been measured so far.
//!
//! The core concepts are:
//!
//! - [`ListLayout`] / [`VisibleWindow`]: what the host's layout pass reports,
//!   namely the realized items with their sizes and offsets, the viewport, and
//!   the item count.
//! - [`RangeCache`]: remembers the summed sizes of index ranges that were
//!   visible once and have scrolled away, as a sorted set of disjoint,
//!   non-adjacent [`RangeEntry`] values. [`RangeCache::reconcile`] folds the
//!   previous window in and evicts the current one.
//! - [`SizeEstimator`]: combines live and cached measurements into a mean item
//!   size, a total extent, and offsets for any index.
//! - [`ScrollController`]: wraps a [`ListHost`] and exposes the current offset,
//!   maximum offset, and async scroll requests. It implements
//!   [`ScrollbarAdapter`], the surface a scrollbar widget consumes, which also
//!   computes [`Thumb`] geometry.
//! - [`CacheTrace`]: optional hooks to observe cache maintenance.
//!
//! This crate does not draw anything and does not own the scroll position.
//! Host frameworks are responsible for:
//!
//! - Reporting the latest layout through [`ListHost::layout`].
//! - Applying relative scroll requests in [`ListHost::scroll_by`].
//! - Calling [`ScrollController::invalidate`] when the list content is replaced.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_scroll_estimate::{ListLayout, RangeCache, SizeEstimator, VisibleItem};
//!
//! let mut cache = RangeCache::<f32>::new();
//!
//! // First pass: items 0..=4 visible, 10 units each.
//! let a: Vec<_> = (0..5).map(|i| VisibleItem::new(i, 10.0, i as f32 * 10.0)).collect();
//! let layout = ListLayout::new(&a, 0.0, 50.0, 100);
//! cache.reconcile(&layout.visible_window().unwrap());
//!
//! // Second pass: scrolled one screen, items 5..=9 are 20 units each.
//! let b: Vec<_> = (5..10).map(|i| VisibleItem::new(i, 20.0, (i - 5) as f32 * 20.0)).collect();
//! let layout = ListLayout::new(&b, 0.0, 50.0, 100);
//! cache.reconcile(&layout.visible_window().unwrap());
//!
//! let estimate = SizeEstimator::new(&layout, &cache).unwrap().estimate();
//! assert_eq!(estimate.mean_item_size, 15.0);
//! assert_eq!(estimate.total_extent, 1500.0);
//! assert_eq!(estimate.offset_above_first_visible, 50.0);
//! ```
//!
//! All sizes and offsets share one caller-chosen 1D coordinate space
//! (typically logical pixels). This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod estimator;
mod interval;
mod layout;
mod range_cache;
mod scalar;
mod thumb;
mod trace;

pub use controller::{EstimateMode, ListHost, ScrollController};
pub use estimator::{Estimate, SizeEstimator};
pub use interval::IndexRange;
pub use layout::{ListLayout, VisibleItem, VisibleWindow};
pub use range_cache::{RangeCache, RangeEntry};
pub use scalar::Scalar;
pub use thumb::{ScrollbarAdapter, Thumb, ThumbStyle};
pub use trace::{CacheEvent, CacheEventLog, CacheTrace};
