// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use rampart_alloc::Allocator;
use rampart_guard::ExceptionGuard;

use crate::error::VectorError;
use crate::relocate::{copy_into, destroy_range, relocate};
use crate::slots::RawSlots;

/// Smallest block [`ReallocationBuffer::extend_unbounded`] grows to.
pub const MIN_UNBOUNDED_CAPACITY: usize = 8;

/// Scratch block used while a vector changes storage.
///
/// Slots `[head, tail)` (the *window*) hold live elements; everything else is
/// uninitialized. Elements are built into the window first, then the vector's
/// own elements are relocated around it and the blocks are exchanged. If
/// anything fails before the exchange, dropping the buffer destroys the
/// window and releases the block, and the vector never noticed.
///
/// # Example
///
/// ```rust
/// use rampart_alloc::Global;
/// use rampart_vec::{ReallocationBuffer, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut buffer = ReallocationBuffer::<String, _>::with_capacity(&Global, 4)?;
///
///     buffer.open_at(1);
///     buffer.emplace_with(|| String::from("b"));
///     buffer.extend_cloned(&[String::from("c")]);
///
///     assert_eq!((buffer.head(), buffer.tail()), (1, 3));
///     assert_eq!(buffer.as_slice(), ["b", "c"]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct ReallocationBuffer<'a, T, A: Allocator> {
    slots: RawSlots<T>,
    head: usize,
    tail: usize,
    alloc: &'a A,
}

impl<T, A: Allocator> core::fmt::Debug for ReallocationBuffer<'_, T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReallocationBuffer")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

impl<'a, T, A: Allocator> ReallocationBuffer<'a, T, A> {
    /// Creates a buffer without a block.
    pub fn new(alloc: &'a A) -> Self {
        Self {
            slots: RawSlots::dangling(),
            head: 0,
            tail: 0,
            alloc,
        }
    }

    /// Creates a buffer with a block of exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] if `capacity` exceeds the allocator's
    /// `max_size`, [`VectorError::Alloc`] if the allocation fails.
    pub fn with_capacity(alloc: &'a A, capacity: usize) -> Result<Self, VectorError> {
        Ok(Self {
            slots: RawSlots::allocate(alloc, capacity)?,
            head: 0,
            tail: 0,
            alloc,
        })
    }

    /// Number of slots in the block.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// First live slot.
    #[inline(always)]
    pub fn head(&self) -> usize {
        self.head
    }

    /// One past the last live slot.
    #[inline(always)]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Number of live elements in the window.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    /// Whether the window is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// The live window.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [head, tail) is live
        unsafe { slice::from_raw_parts(self.slots.slot(self.head).as_ptr(), self.len()) }
    }

    /// Moves the empty window to `offset`.
    ///
    /// # Panics
    ///
    /// If the window is not empty or `offset > capacity()`.
    pub fn open_at(&mut self, offset: usize) {
        assert!(self.is_empty(), "open_at() on a non-empty window");
        assert!(offset <= self.capacity(), "open_at() past the end of the block");

        self.head = offset;
        self.tail = offset;
    }

    /// Constructs one element at the tail.
    ///
    /// If `produce` panics, the window is unchanged.
    ///
    /// # Panics
    ///
    /// If the block is full.
    pub fn emplace_with<F>(&mut self, produce: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(self.tail < self.capacity(), "emplace_with() on a full block");

        let value = produce();
        // SAFETY (PRECONDITIONS ARE MET): tail < capacity and the slot is free
        let slot = unsafe {
            let slot = self.slots.slot(self.tail);
            self.alloc.construct(slot, value);
            slot
        };
        self.tail += 1;

        // SAFETY (PRECONDITIONS ARE MET): slot was just constructed and is owned by the window
        unsafe { &mut *slot.as_ptr() }
    }

    /// Constructs `count` elements at the tail, one `produce()` call each.
    ///
    /// Elements built before a panic stay in the window and are destroyed
    /// with the buffer.
    ///
    /// # Panics
    ///
    /// If fewer than `count` slots remain after the tail.
    pub fn extend_with<F>(&mut self, count: usize, mut produce: F)
    where
        F: FnMut() -> T,
    {
        assert!(count <= self.capacity() - self.tail, "extend_with() past the end of the block");

        for _ in 0..count {
            self.emplace_with(&mut produce);
        }
    }

    /// Clones `src` at the tail.
    ///
    /// All or nothing: a panicking clone leaves the window unchanged.
    ///
    /// # Panics
    ///
    /// If fewer than `src.len()` slots remain after the tail.
    pub fn extend_cloned(&mut self, src: &[T])
    where
        T: Clone,
    {
        assert!(src.len() <= self.capacity() - self.tail, "extend_cloned() past the end of the block");

        // SAFETY (PRECONDITIONS ARE MET): [tail, tail + src.len()) is free and inside the block
        unsafe { copy_into(self.alloc, src, self.slots.slot(self.tail)) };
        self.tail += src.len();
    }

    /// Moves every item of `iter` to the tail, growing the block as needed.
    ///
    /// Growth doubles the block (at least [`MIN_UNBOUNDED_CAPACITY`] slots)
    /// and relocates the window to the same offset in the new block.
    ///
    /// # Errors
    ///
    /// Fails if a growth step cannot allocate. Items taken so far stay in
    /// the window.
    pub fn extend_unbounded<I>(&mut self, iter: I) -> Result<(), VectorError>
    where
        I: IntoIterator<Item = T>,
    {
        for item in iter {
            if self.tail == self.capacity() {
                self.grow()?;
            }

            // SAFETY (PRECONDITIONS ARE MET): grow() guarantees tail < capacity
            unsafe { self.alloc.construct(self.slots.slot(self.tail), item) };
            self.tail += 1;
        }

        Ok(())
    }

    /// Extends the window over elements the caller relocated right before
    /// `head` (`before` of them) and right after `tail` (`after` of them).
    ///
    /// # Safety
    ///
    /// Slots `[head - before, head)` and `[tail, tail + after)` must hold
    /// live elements no one else owns.
    pub unsafe fn adopt_relocated(&mut self, before: usize, after: usize) {
        debug_assert!(before <= self.head);
        debug_assert!(after <= self.capacity() - self.tail);

        self.head -= before;
        self.tail += after;
    }

    /// Moves the whole window of `other` right after this window's tail.
    ///
    /// If a relocation hook panics, `other` still owns its elements.
    ///
    /// # Panics
    ///
    /// If fewer than `other.len()` slots remain after the tail.
    pub fn append_relocated(&mut self, other: &mut ReallocationBuffer<'_, T, A>) {
        let count = other.len();
        assert!(count <= self.capacity() - self.tail, "append_relocated() past the end of the block");

        // SAFETY (PRECONDITIONS ARE MET): other's window is live, our tail slots are free, blocks differ
        unsafe {
            relocate(self.alloc, other.slots.slot(other.head), self.slots.slot(self.tail), count);
            other.tail = other.head;
            self.adopt_relocated(0, count);
        }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<(), VectorError> {
        let max = self.alloc.max_size::<T>();
        let target = cmp::max(self.capacity().saturating_mul(2), MIN_UNBOUNDED_CAPACITY);
        let target = cmp::min(target, max);

        if target <= self.tail {
            return Err(VectorError::CapacityOverflow {
                requested: self.tail.saturating_add(1),
                max,
            });
        }

        let mut grown = ReallocationBuffer::with_capacity(self.alloc, target)?;
        grown.open_at(self.head);

        // SAFETY (PRECONDITIONS ARE MET): window is live, grown is fresh and has room at the same offset
        unsafe {
            relocate(self.alloc, self.slots.slot(self.head), grown.slots.slot(self.head), self.len());
            grown.adopt_relocated(0, self.len());
        }
        self.tail = self.head;

        tracing::trace!(from = self.capacity(), to = target, "scratch buffer grown");

        // The old block leaves with `grown` and is released on its drop.
        mem::swap(self, &mut grown);

        Ok(())
    }

    /// Pointer to slot `index` of the block.
    ///
    /// # Safety
    ///
    /// `index <= capacity()`.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller
        unsafe { self.slots.slot(index) }
    }

    /// Exchanges blocks with a vector, placing the vector's elements around
    /// the window.
    ///
    /// Elements `[0, head)` of the vector land right before `head`, elements
    /// `[head, len)` right after `tail`. Afterwards `slots`/`len` describe
    /// this buffer's former block and the buffer owns the vector's former
    /// block with an empty window, released when the buffer drops.
    ///
    /// If a relocation hook panics, the vector still owns every one of its
    /// elements and the window is unchanged.
    ///
    /// # Safety
    ///
    /// `slots` must come from this buffer's allocator (or one comparing
    /// equal), with `[0, len)` live. `head <= *len` and the block must have
    /// room for `*len - head` elements after `tail`.
    pub(crate) unsafe fn swap_in(&mut self, slots: &mut RawSlots<T>, len: &mut usize) {
        let split = self.head;
        let suffix = *len - split;

        debug_assert!(split <= *len);
        debug_assert!(suffix <= self.capacity() - self.tail);

        // SAFETY (PRECONDITIONS ARE MET): ranges are live/free as documented and live in different blocks
        unsafe {
            let old_suffix = slots.slot(split);
            let new_suffix = self.slots.slot(self.tail);

            // 1. Suffix after the window. A panic here is fully undone by `relocate`.
            relocate(self.alloc, old_suffix, new_suffix, suffix);

            // 2. Prefix before the window. A panic here puts the suffix back.
            let guard = ExceptionGuard::new(|| {
                ptr::copy_nonoverlapping(new_suffix.as_ptr(), old_suffix.as_ptr(), suffix);
            });
            relocate(self.alloc, slots.slot(0), self.slots.slot(0), split);
            guard.complete();

            self.adopt_relocated(split, suffix);
        }

        tracing::trace!(
            from = slots.capacity(),
            to = self.capacity(),
            len = self.len(),
            "vector reallocated"
        );

        // 3. Exchange blocks. The old block comes back with an empty window.
        mem::swap(&mut self.slots, slots);
        *len = self.len();
        self.head = 0;
        self.tail = 0;
    }
}

impl<T, A: Allocator> Drop for ReallocationBuffer<'_, T, A> {
    fn drop(&mut self) {
        let count = self.len();
        let alloc = self.alloc;
        // SAFETY (PRECONDITIONS ARE MET): head <= capacity
        let first = unsafe { self.slots.slot(self.head) };
        self.tail = self.head;

        let slots = &mut self.slots;
        let _release = ExceptionGuard::new(|| {
            // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc`; the window is destroyed by now
            unsafe { slots.release(alloc) };
        });

        // SAFETY (PRECONDITIONS ARE MET): the window was live and is now empty
        unsafe { destroy_range(alloc, first, count) };
    }
}
