// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive index intervals.

use core::fmt;

/// An inclusive range of item indices, `[first, last]`.
///
/// A range with `first > last` is empty; [`IndexRange::EMPTY`] is the canonical
/// empty value. Unlike `core::ops::RangeInclusive`, this type is `Copy` and
/// never carries iteration state.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct IndexRange {
    /// First index in the range.
    pub first: usize,
    /// Last index in the range (inclusive).
    pub last: usize,
}

impl IndexRange {
    /// The canonical empty range.
    pub const EMPTY: Self = Self { first: 1, last: 0 };

    /// Creates the range `[first, last]`.
    #[must_use]
    pub const fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Creates the range covering a single index.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    /// Returns `true` if the range contains no indices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Number of indices in the range; `0` for empty or reversed ranges.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.last - self.first + 1
        }
    }

    /// Returns `true` if `index` lies inside the range.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    /// Returns `true` if the two ranges share at least one index.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.first <= other.last
            && other.first <= self.last
    }

    /// Returns `true` if `next` starts exactly one index after `self` ends.
    #[must_use]
    pub fn is_followed_by(&self, next: &Self) -> bool {
        !self.is_empty() && !next.is_empty() && self.last.checked_add(1) == Some(next.first)
    }

    /// Returns the smallest range covering both `self` and `other`.
    ///
    /// Empty inputs are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (_, true) => *self,
            _ => Self::new(self.first.min(other.first), self.last.max(other.last)),
        }
    }

    /// Splits `self` around `hole`, returning the leading and trailing remainders.
    ///
    /// The leading remainder is `[self.first, hole.first - 1]` and the trailing
    /// one is `[hole.last + 1, self.last]`, each clipped to `self`. Either may
    /// be empty. An empty `hole` leaves `self` whole in the leading slot.
    #[must_use]
    pub fn split_around(&self, hole: &Self) -> (Self, Self) {
        if self.is_empty() {
            return (Self::EMPTY, Self::EMPTY);
        }
        if hole.is_empty() {
            return (*self, Self::EMPTY);
        }
        let top = if hole.first > self.first {
            Self::new(self.first, (hole.first - 1).min(self.last))
        } else {
            Self::EMPTY
        };
        let bottom = match hole.last.checked_add(1) {
            Some(start) if start <= self.last => Self::new(start.max(self.first), self.last),
            _ => Self::EMPTY,
        };
        (top, bottom)
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("[]")
        } else {
            write!(f, "[{}, {}]", self.first, self.last)
        }
    }
}
