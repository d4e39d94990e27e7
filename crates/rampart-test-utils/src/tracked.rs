// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Elements that count live instances and panic on demand.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default)]
struct TrackerState {
    live: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
    panic_on_clone: Cell<Option<usize>>,
    panic_on_drop: Cell<Option<usize>>,
}

/// Factory and shared counters for [`Tracked`] elements.
///
/// Clones of a tracker share the same counters.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    state: Rc<TrackerState>,
}

impl Tracker {
    /// Tracker with zeroed counters and nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a live element holding `value`.
    pub fn make(&self, value: i32) -> Tracked {
        self.state.live.set(self.state.live.get() + 1);

        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    /// Creates live elements for every value in `values`.
    pub fn make_all(&self, values: impl IntoIterator<Item = i32>) -> Vec<Tracked> {
        values.into_iter().map(|value| self.make(value)).collect()
    }

    /// Number of elements created and not yet dropped.
    pub fn live(&self) -> usize {
        self.state.live.get()
    }

    /// Panics on the clone `index` calls from now (0-indexed).
    pub fn panic_on_clone(&self, index: usize) {
        self.state.clones.set(0);
        self.state.panic_on_clone.set(Some(index));
    }

    /// Panics on the drop `index` calls from now (0-indexed).
    pub fn panic_on_drop(&self, index: usize) {
        self.state.drops.set(0);
        self.state.panic_on_drop.set(Some(index));
    }

    /// Clears every armed panic.
    pub fn disarm(&self) {
        self.state.panic_on_clone.set(None);
        self.state.panic_on_drop.set(None);
    }

    fn tick(counter: &Cell<usize>, armed: &Cell<Option<usize>>) -> bool {
        let current = counter.get();
        counter.set(current + 1);

        if armed.get() == Some(current) {
            armed.set(None);
            return true;
        }

        false
    }
}

/// Element created by a [`Tracker`].
///
/// Compares, orders and prints by value only.
pub struct Tracked {
    value: i32,
    tracker: Tracker,
}

impl Tracked {
    /// Value given at creation or copied by `clone`.
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let state = &self.tracker.state;

        if Tracker::tick(&state.clones, &state.panic_on_clone) {
            panic!("Tracked::clone() of {} refused", self.value);
        }

        self.tracker.make(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let state = &self.tracker.state;
        let live = state
            .live
            .get()
            .checked_sub(1)
            .unwrap_or_else(|| panic!("Tracked {} dropped twice", self.value));
        state.live.set(live);

        if Tracker::tick(&state.drops, &state.panic_on_drop) {
            panic!("Tracked::drop() of {} refused", self.value);
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
