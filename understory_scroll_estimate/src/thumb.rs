// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between scroll estimation and a scrollbar widget.
//!
//! A scrollbar widget only needs three things from the scrolled content: where
//! it is, how far it can go, and a way to move it. [`ScrollbarAdapter`] is that
//! surface. [`ScrollbarAdapter::thumb`] turns those numbers into a thumb
//! position and length along the scrollbar track; drawing and hit-testing the
//! thumb stay with the widget.

use core::future::Future;

use crate::Scalar;

/// Visual constraints for the scrollbar thumb.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThumbStyle<S> {
    /// Smallest thumb length along the track.
    pub min_extent: S,
}

impl<S: Scalar> ThumbStyle<S> {
    /// Creates a style with the given minimal thumb length.
    #[must_use]
    pub fn new(min_extent: S) -> Self {
        Self { min_extent }
    }
}

impl<S: Scalar> Default for ThumbStyle<S> {
    /// A minimal thumb length of 16 units.
    fn default() -> Self {
        Self::new(S::from_usize(16))
    }
}

/// Thumb placement along a scrollbar track.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Thumb<S> {
    /// Distance from the start of the track to the thumb.
    pub start: S,
    /// Length of the thumb.
    pub length: S,
}

impl<S: Scalar> Thumb<S> {
    /// Computes thumb geometry from scroll metrics.
    ///
    /// The thumb length is the visible fraction of the content applied to the
    /// track, at least `style.min_extent` and at most the track. The thumb
    /// start is the scroll fraction applied to the track space left over.
    /// When the content fits in the container the thumb fills the track.
    #[must_use]
    pub fn compute(
        scroll_offset: S,
        max_scroll_offset: S,
        container_extent: S,
        track_extent: S,
        style: &ThumbStyle<S>,
    ) -> Self {
        let total = max_scroll_offset + container_extent;
        if max_scroll_offset <= S::zero() || !total.is_finite() {
            return Self {
                start: S::zero(),
                length: track_extent,
            };
        }
        let length = (track_extent * container_extent / total)
            .max(style.min_extent)
            .min(track_extent);
        let fraction = (scroll_offset / max_scroll_offset).clamp_between(S::zero(), S::one());
        Self {
            start: (track_extent - length) * fraction,
            length,
        }
    }

    /// End of the thumb along the track.
    #[must_use]
    pub fn end(&self) -> S {
        self.start + self.length
    }
}

/// What a scrollbar widget consumes from scrollable content.
///
/// `container_extent` is the extent of the scrolled viewport, as the widget
/// sees it.
pub trait ScrollbarAdapter {
    /// Scalar type for offsets and extents.
    type Scalar: Scalar;

    /// Current scroll offset of the content.
    fn scroll_offset(&mut self) -> Self::Scalar;

    /// Largest scroll offset for a container of `container_extent`.
    ///
    /// May be negative when the content is shorter than the container.
    fn max_scroll_offset(&mut self, container_extent: Self::Scalar) -> Self::Scalar;

    /// Scrolls the content so that its offset becomes `offset`.
    ///
    /// Resolves once the host has applied the scroll.
    fn scroll_to(
        &mut self,
        container_extent: Self::Scalar,
        offset: Self::Scalar,
    ) -> impl Future<Output = ()>;

    /// Thumb geometry for a track of `track_extent`.
    fn thumb(
        &mut self,
        container_extent: Self::Scalar,
        track_extent: Self::Scalar,
        style: &ThumbStyle<Self::Scalar>,
    ) -> Thumb<Self::Scalar> {
        let max = self.max_scroll_offset(container_extent);
        let offset = self.scroll_offset();
        Thumb::compute(offset, max, container_extent, track_extent, style)
    }
}
