// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for range cache maintenance.
//!
//! The cache does not log. Hosts that want to see why an estimate moved (for
//! example in an inspector panel, or when chasing a jumping scrollbar thumb)
//! can pass a [`CacheTrace`] sink to
//! [`RangeCache::reconcile_with_trace`](crate::RangeCache::reconcile_with_trace).
//!
//! `()` is the no-op sink. [`CacheEventLog`] records every event in order.

use alloc::vec::Vec;

use crate::{IndexRange, RangeEntry};

/// A callback sink for range cache maintenance.
///
/// All methods have empty default bodies so sinks only override what they need.
pub trait CacheTrace<S> {
    /// A cached entry overlapping the visible range was removed.
    ///
    /// `trimmed` is the live size of visible items that fell inside it.
    fn evicted(&mut self, entry: RangeEntry<S>, trimmed: S) {
        let _ = (entry, trimmed);
    }

    /// The non-visible remainder of an evicted entry was discarded because
    /// its remaining size was zero or negative.
    fn remainder_dropped(&mut self, range: IndexRange, remaining: S) {
        let _ = (range, remaining);
    }

    /// A remainder of an evicted entry was put back into the cache.
    fn split(&mut self, entry: RangeEntry<S>) {
        let _ = entry;
    }

    /// The previously visible window was folded into the cache.
    fn inserted(&mut self, entry: RangeEntry<S>) {
        let _ = entry;
    }

    /// Two index-contiguous entries were merged into `merged`.
    fn merged(&mut self, merged: RangeEntry<S>) {
        let _ = merged;
    }

    /// The cache was cleared, dropping `entries` entries.
    fn cleared(&mut self, entries: usize) {
        let _ = entries;
    }
}

impl<S> CacheTrace<S> for () {}

/// A recorded cache maintenance event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CacheEvent<S> {
    /// See [`CacheTrace::evicted`].
    Evicted {
        /// The removed entry.
        entry: RangeEntry<S>,
        /// Live size of the visible items inside it.
        trimmed: S,
    },
    /// See [`CacheTrace::remainder_dropped`].
    RemainderDropped {
        /// Range that would have remained cached.
        range: IndexRange,
        /// The non-positive size left over.
        remaining: S,
    },
    /// See [`CacheTrace::split`].
    Split(RangeEntry<S>),
    /// See [`CacheTrace::inserted`].
    Inserted(RangeEntry<S>),
    /// See [`CacheTrace::merged`].
    Merged(RangeEntry<S>),
    /// See [`CacheTrace::cleared`].
    Cleared(usize),
}

/// Records every cache event in order.
#[derive(Clone, Debug, Default)]
pub struct CacheEventLog<S> {
    events: Vec<CacheEvent<S>>,
}

impl<S> CacheEventLog<S> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// The recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CacheEvent<S>] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn take(&mut self) -> Vec<CacheEvent<S>> {
        core::mem::take(&mut self.events)
    }

    /// Forgets all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<S> CacheTrace<S> for CacheEventLog<S> {
    fn evicted(&mut self, entry: RangeEntry<S>, trimmed: S) {
        self.events.push(CacheEvent::Evicted { entry, trimmed });
    }

    fn remainder_dropped(&mut self, range: IndexRange, remaining: S) {
        self.events
            .push(CacheEvent::RemainderDropped { range, remaining });
    }

    fn split(&mut self, entry: RangeEntry<S>) {
        self.events.push(CacheEvent::Split(entry));
    }

    fn inserted(&mut self, entry: RangeEntry<S>) {
        self.events.push(CacheEvent::Inserted(entry));
    }

    fn merged(&mut self, merged: RangeEntry<S>) {
        self.events.push(CacheEvent::Merged(merged));
    }

    fn cleared(&mut self, entries: usize) {
        self.events.push(CacheEvent::Cleared(entries));
    }
}
