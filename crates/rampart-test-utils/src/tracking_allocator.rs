// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocators that count, verify and fail on demand.

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ptr::{self, NonNull};
use std::rc::Rc;

use rampart_alloc::{AllocError, Allocator, Global};

/// Failure to inject. Indexes count calls of the targeted kind from the
/// moment the behaviour is set (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocatorBehaviour {
    /// No failure.
    #[default]
    None,
    /// `allocate` returns `AllocError` at call index.
    FailAllocateAt(usize),
    /// `construct` panics at call index, dropping the value.
    PanicConstructAt(usize),
    /// `relocate_one` panics at call index, before touching either slot.
    PanicRelocateAt(usize),
}

/// Counters shared by every clone of a [`TrackingAllocator`].
#[derive(Debug, Default)]
pub struct AllocatorStats {
    allocate_calls: Cell<usize>,
    deallocations: Cell<usize>,
    construct_calls: Cell<usize>,
    destroy_calls: Cell<usize>,
    relocate_calls: Cell<usize>,
    blocks: RefCell<HashMap<usize, Layout>>,
    behaviour: Cell<AllocatorBehaviour>,
    behaviour_calls: Cell<usize>,
    scrub_on_relocate: Cell<bool>,
}

impl AllocatorStats {
    /// Calls to `allocate`, failed ones included.
    pub fn allocate_calls(&self) -> usize {
        self.allocate_calls.get()
    }

    /// Blocks returned through `deallocate`.
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Calls to `construct`, panicking ones included.
    pub fn construct_calls(&self) -> usize {
        self.construct_calls.get()
    }

    /// Calls to `destroy`.
    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.get()
    }

    /// Calls to `relocate_one`, panicking ones included.
    pub fn relocate_calls(&self) -> usize {
        self.relocate_calls.get()
    }

    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.blocks.borrow().len()
    }

    /// Bytes handed out and not yet returned.
    pub fn live_bytes(&self) -> usize {
        self.blocks.borrow().values().map(Layout::size).sum()
    }

    fn hit(&self, matches: impl FnOnce(AllocatorBehaviour) -> Option<usize>) -> bool {
        let Some(index) = matches(self.behaviour.get()) else {
            return false;
        };

        let current = self.behaviour_calls.get();
        self.behaviour_calls.set(current + 1);

        if current == index {
            self.behaviour.set(AllocatorBehaviour::None);
            return true;
        }

        false
    }
}

/// Allocator over [`Global`] that observes every lifecycle hook.
///
/// Clones share their counters and compare equal. Allocators built with
/// different ids compare unequal, so tests can exercise the paths where a
/// block cannot change hands. Propagates on copy, move and swap.
#[derive(Debug, Clone)]
pub struct TrackingAllocator {
    id: usize,
    stats: Rc<AllocatorStats>,
}

impl PartialEq for TrackingAllocator {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new(AllocatorBehaviour::None)
    }
}

impl TrackingAllocator {
    /// Allocator with id 0.
    pub fn new(behaviour: AllocatorBehaviour) -> Self {
        Self::with_id(0, behaviour)
    }

    /// Allocator equal only to its clones and to other allocators with the same `id`.
    pub fn with_id(id: usize, behaviour: AllocatorBehaviour) -> Self {
        let stats = Rc::new(AllocatorStats::default());
        stats.behaviour.set(behaviour);

        Self { id, stats }
    }

    /// Identity compared by `==`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Counters shared with every clone.
    pub fn stats(&self) -> &AllocatorStats {
        &self.stats
    }

    /// Replaces the behaviour and restarts its call index.
    pub fn change_behaviour(&self, behaviour: AllocatorBehaviour) {
        self.stats.behaviour.set(behaviour);
        self.stats.behaviour_calls.set(0);
    }

    /// Overwrites the source slot with `0xA5` after every relocation.
    pub fn scrub_on_relocate(&self, enabled: bool) {
        self.stats.scrub_on_relocate.set(enabled);
    }
}

impl Allocator for TrackingAllocator {
    const PROPAGATE_ON_COPY: bool = true;
    const PROPAGATE_ON_MOVE: bool = true;
    const PROPAGATE_ON_SWAP: bool = true;
    const OBSERVES_LIFECYCLE: bool = true;

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let stats = &self.stats;
        stats.allocate_calls.set(stats.allocate_calls.get() + 1);

        if stats.hit(|b| match b {
            AllocatorBehaviour::FailAllocateAt(index) => Some(index),
            _ => None,
        }) {
            return Err(AllocError::for_layout(layout));
        }

        let ptr = Global.allocate(layout)?;
        stats.blocks.borrow_mut().insert(ptr.as_ptr() as usize, layout);

        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let stats = &self.stats;
        let recorded = stats.blocks.borrow_mut().remove(&(ptr.as_ptr() as usize));

        assert_eq!(recorded, Some(layout), "deallocate() with a foreign block or layout");
        stats.deallocations.set(stats.deallocations.get() + 1);

        // SAFETY (PRECONDITIONS ARE MET): block was handed out by Global with this layout
        unsafe { Global.deallocate(ptr, layout) };
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        let stats = &self.stats;
        stats.construct_calls.set(stats.construct_calls.get() + 1);

        if stats.hit(|b| match b {
            AllocatorBehaviour::PanicConstructAt(index) => Some(index),
            _ => None,
        }) {
            panic!("construct() refused");
        }

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `slot` is writable and uninitialized
        unsafe { slot.as_ptr().write(value) };
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        let stats = &self.stats;
        stats.destroy_calls.set(stats.destroy_calls.get() + 1);

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `slot` holds a live `T`
        unsafe { ptr::drop_in_place(slot.as_ptr()) };
    }

    unsafe fn relocate_one<T>(&self, from: NonNull<T>, to: NonNull<T>) {
        let stats = &self.stats;
        stats.relocate_calls.set(stats.relocate_calls.get() + 1);

        if stats.hit(|b| match b {
            AllocatorBehaviour::PanicRelocateAt(index) => Some(index),
            _ => None,
        }) {
            panic!("relocate_one() refused");
        }

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees both slots are valid and disjoint
        unsafe {
            ptr::copy_nonoverlapping(from.as_ptr(), to.as_ptr(), 1);

            if stats.scrub_on_relocate.get() {
                ptr::write_bytes(from.as_ptr().cast::<u8>(), 0xA5, std::mem::size_of::<T>());
            }
        }
    }
}

/// [`TrackingAllocator`] that never propagates.
///
/// Copy, move and swap keep each vector's own allocator, which forces
/// element-wise transfers between unequal allocators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PinnedAllocator(pub TrackingAllocator);

impl PinnedAllocator {
    /// Pinned allocator with `id` and no injected failure.
    pub fn with_id(id: usize) -> Self {
        Self(TrackingAllocator::with_id(id, AllocatorBehaviour::None))
    }

    /// Counters of the wrapped allocator.
    pub fn stats(&self) -> &AllocatorStats {
        self.0.stats()
    }
}

impl Allocator for PinnedAllocator {
    const PROPAGATE_ON_COPY: bool = false;
    const PROPAGATE_ON_MOVE: bool = false;
    const PROPAGATE_ON_SWAP: bool = false;
    const OBSERVES_LIFECYCLE: bool = true;

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.0.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY (PRECONDITIONS ARE MET): forwarded contract
        unsafe { self.0.deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY (PRECONDITIONS ARE MET): forwarded contract
        unsafe { self.0.construct(slot, value) }
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY (PRECONDITIONS ARE MET): forwarded contract
        unsafe { self.0.destroy(slot) }
    }

    unsafe fn relocate_one<T>(&self, from: NonNull<T>, to: NonNull<T>) {
        // SAFETY (PRECONDITIONS ARE MET): forwarded contract
        unsafe { self.0.relocate_one(from, to) }
    }
}
