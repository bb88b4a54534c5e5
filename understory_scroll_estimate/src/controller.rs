// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll controller tying a host list to the range cache and estimator.

use core::future::Future;

use crate::{
    CacheTrace, Estimate, ListLayout, RangeCache, Scalar, ScrollbarAdapter, SizeEstimator,
};

/// The list being scrolled, as seen by the controller.
///
/// Implemented by the host UI framework. The controller never owns the scroll
/// position; it reads the latest layout and asks the host to move.
pub trait ListHost {
    /// Scalar type for sizes and offsets.
    type Scalar: Scalar;

    /// Layout from the most recent pass.
    fn layout(&self) -> ListLayout<'_, Self::Scalar>;

    /// Scrolls the list by `delta` and resolves to the distance actually
    /// scrolled once the host has applied it.
    ///
    /// Hosts that are torn down while a scroll is pending should resolve
    /// to zero rather than touch released state.
    fn scroll_by(&mut self, delta: Self::Scalar) -> impl Future<Output = Self::Scalar>;
}

/// How [`ScrollController`] estimates sizes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EstimateMode {
    /// Combine the visible window with cached measurements of ranges seen before.
    #[default]
    Cached,
    /// Use only the visible window. Stateless, but less accurate when item
    /// sizes vary across the list.
    VisibleOnly,
}

/// Scroll position and extent estimates for a [`ListHost`].
///
/// Every query re-reads the host layout and reconciles the cache first, so
/// hosts just call into the controller once per frame (or whenever the
/// scrollbar asks) without tracking what changed.
///
/// Scroll requests borrow the controller mutably until they resolve, so at
/// most one request is in flight per controller. Dropping the returned
/// future abandons the request.
#[derive(Debug)]
pub struct ScrollController<H: ListHost> {
    host: H,
    cache: RangeCache<H::Scalar>,
    mode: EstimateMode,
}

impl<H: ListHost> ScrollController<H> {
    /// Creates a controller using [`EstimateMode::Cached`].
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            cache: RangeCache::new(),
            mode: EstimateMode::default(),
        }
    }

    /// Builder-style [`set_mode`](Self::set_mode).
    #[must_use]
    pub fn with_mode(mut self, mode: EstimateMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Current estimation mode.
    #[must_use]
    pub fn mode(&self) -> EstimateMode {
        self.mode
    }

    /// Switches the estimation mode, dropping cached measurements.
    pub fn set_mode(&mut self, mode: EstimateMode) {
        if self.mode != mode {
            self.mode = mode;
            self.cache.clear();
        }
    }

    /// The host list.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host list.
    ///
    /// If the list content is replaced through this reference, call
    /// [`invalidate`](Self::invalidate) afterwards.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Swaps in a different list, returning the old one.
    ///
    /// Cached measurements belong to the old list and are dropped.
    pub fn replace_host(&mut self, host: H) -> H {
        self.cache.clear();
        core::mem::replace(&mut self.host, host)
    }

    /// Drops cached measurements, e.g. after the list content changed.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Cached measurements of hidden ranges.
    #[must_use]
    pub fn cache(&self) -> &RangeCache<H::Scalar> {
        &self.cache
    }

    /// Reconciles the cache with the host's layout and estimates.
    ///
    /// Returns `None`, clearing the cache, when no items are visible.
    pub fn update(&mut self) -> Option<Estimate<H::Scalar>> {
        self.update_with_trace(&mut ())
    }

    /// Like [`update`](Self::update), reporting cache maintenance to `trace`.
    pub fn update_with_trace(
        &mut self,
        trace: &mut impl CacheTrace<H::Scalar>,
    ) -> Option<Estimate<H::Scalar>> {
        let layout = self.host.layout();
        let Some(window) = layout.visible_window() else {
            self.cache.clear_with_trace(trace);
            return None;
        };
        let estimator = match self.mode {
            EstimateMode::Cached => {
                self.cache.reconcile_with_trace(&window, trace);
                SizeEstimator::new(&layout, &self.cache)
            }
            EstimateMode::VisibleOnly => SizeEstimator::visible_only(&layout),
        };
        estimator.map(|e| e.estimate())
    }

    /// Estimated scroll offset, or zero when nothing is visible.
    pub fn current_offset(&mut self) -> H::Scalar {
        self.update()
            .map_or_else(H::Scalar::zero, |e| e.offset_above_first_visible)
    }

    /// Estimated total extent minus `viewport_extent`.
    ///
    /// May be negative when the content is shorter than the viewport.
    pub fn max_offset(&mut self, viewport_extent: H::Scalar) -> H::Scalar {
        let total = self
            .update()
            .map_or_else(H::Scalar::zero, |e| e.total_extent);
        total - viewport_extent
    }

    /// Estimated distance from the content start to item `index`.
    ///
    /// Returns `None` when nothing is visible.
    pub fn offset_of(&mut self, index: usize) -> Option<H::Scalar> {
        self.update()?;
        let layout = self.host.layout();
        let estimator = match self.mode {
            EstimateMode::Cached => SizeEstimator::new(&layout, &self.cache),
            EstimateMode::VisibleOnly => SizeEstimator::visible_only(&layout),
        };
        estimator.map(|e| e.offset_of(index))
    }

    /// Asks the host to scroll by `delta`, resolving to the distance scrolled.
    pub async fn scroll_by(&mut self, delta: H::Scalar) -> H::Scalar {
        self.host.scroll_by(delta).await
    }

    /// Scrolls so that the estimated offset becomes `offset`.
    ///
    /// The request is relative: `offset - current_offset()` is passed to the
    /// host. Since the estimate refines as new items are measured, landing
    /// exactly on `offset` is not guaranteed.
    pub async fn scroll_to_offset(&mut self, offset: H::Scalar) -> H::Scalar {
        let delta = offset - self.current_offset();
        self.scroll_by(delta).await
    }

    /// Scrolls so that item `index` starts at the viewport's leading edge.
    pub async fn scroll_to_index(&mut self, index: usize) -> H::Scalar {
        match self.offset_of(index) {
            Some(target) => self.scroll_to_offset(target).await,
            None => H::Scalar::zero(),
        }
    }
}

impl<H: ListHost> ScrollbarAdapter for ScrollController<H> {
    type Scalar = H::Scalar;

    fn scroll_offset(&mut self) -> Self::Scalar {
        self.current_offset()
    }

    fn max_scroll_offset(&mut self, container_extent: Self::Scalar) -> Self::Scalar {
        self.max_offset(container_extent)
    }

    fn scroll_to(
        &mut self,
        _container_extent: Self::Scalar,
        offset: Self::Scalar,
    ) -> impl Future<Output = ()> {
        async move {
            self.scroll_to_offset(offset).await;
        }
    }
}
