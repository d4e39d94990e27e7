// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Moving and cloning element ranges into uninitialized storage.
//!
//! Every Rust move is a bitwise copy that cannot fail, so relocating a range
//! is a single `memcpy` unless the allocator asked to observe element
//! lifecycle. In that case each element passes through
//! [`Allocator::relocate_one`], and a hook that panics halfway is undone by
//! copying the relocated prefix back.

use core::cell::Cell;
use core::ptr::{self, NonNull};

use rampart_alloc::Allocator;
use rampart_guard::ExceptionGuard;

/// How a range of `T` is moved between blocks owned by `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// One `ptr::copy_nonoverlapping` for the whole range.
    Bulk,
    /// One `A::relocate_one` call per element, front to back.
    PerElement,
}

impl Relocation {
    /// Strategy used for `T` under allocator `A`.
    #[inline(always)]
    pub const fn of<T, A: Allocator>() -> Self {
        if A::OBSERVES_LIFECYCLE {
            Self::PerElement
        } else {
            Self::Bulk
        }
    }
}

/// Moves `count` elements from `src` into uninitialized `dst`.
///
/// On return the source slots are logically uninitialized. If a relocation
/// hook panics, every element is back in its source slot before the panic
/// propagates, and `dst` is logically uninitialized.
///
/// # Safety
///
/// - `src` must hold `count` live elements.
/// - `dst` must be valid for `count` writes.
/// - The two ranges must not overlap.
pub unsafe fn relocate<T, A: Allocator>(alloc: &A, src: NonNull<T>, dst: NonNull<T>, count: usize) {
    match Relocation::of::<T, A>() {
        Relocation::Bulk => {
            // SAFETY (PRECONDITIONS ARE MET): caller guarantees valid, disjoint ranges
            unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), count) };
        }
        Relocation::PerElement => {
            let moved = Cell::new(0usize);

            let guard = ExceptionGuard::new(|| {
                // Hooks may have scrubbed the source; the destination holds the exact bits.
                for i in (0..moved.get()).rev() {
                    // SAFETY (PRECONDITIONS ARE MET): slot i was relocated, so dst[i] is live and src[i] is free
                    unsafe { ptr::copy_nonoverlapping(dst.add(i).as_ptr(), src.add(i).as_ptr(), 1) };
                }
            });

            for i in 0..count {
                // SAFETY (PRECONDITIONS ARE MET): i < count, both slots in range
                unsafe { alloc.relocate_one(src.add(i), dst.add(i)) };
                moved.set(i + 1);
            }

            guard.complete();
        }
    }
}

/// Constructs `count` elements produced by `produce(i)` into `dst`, front to
/// back.
///
/// If `produce` or the construct hook panics, the elements already built are
/// destroyed in reverse order and `dst` is logically uninitialized again.
///
/// # Safety
///
/// `dst` must be valid for `count` writes and hold no live elements.
pub unsafe fn construct_with<T, A, F>(alloc: &A, dst: NonNull<T>, count: usize, mut produce: F)
where
    A: Allocator,
    F: FnMut(usize) -> T,
{
    let built = Cell::new(0usize);

    let guard = ExceptionGuard::new(|| {
        for i in (0..built.get()).rev() {
            // SAFETY (PRECONDITIONS ARE MET): slot i was constructed above
            unsafe { alloc.destroy(dst.add(i)) };
        }
    });

    for i in 0..count {
        let value = produce(i);
        // SAFETY (PRECONDITIONS ARE MET): i < count, slot is uninitialized
        unsafe { alloc.construct(dst.add(i), value) };
        built.set(i + 1);
    }

    guard.complete();
}

/// Destroys `count` live elements starting at `first`, front to back.
///
/// A destructor that panics does not stop the walk: the elements after it
/// are still destroyed while the panic unwinds.
///
/// # Safety
///
/// `first` must hold `count` live elements that are not used afterwards.
pub(crate) unsafe fn destroy_range<T, A: Allocator>(alloc: &A, first: NonNull<T>, count: usize) {
    let current = Cell::new(0usize);

    let guard = ExceptionGuard::new(|| {
        let next = current.get() + 1;
        // SAFETY (PRECONDITIONS ARE MET): slots after the panicking one are still live
        unsafe { destroy_range(alloc, first.add(next), count - next) };
    });

    while current.get() < count {
        // SAFETY (PRECONDITIONS ARE MET): current < count, slot is live
        unsafe { alloc.destroy(first.add(current.get())) };
        current.set(current.get() + 1);
    }

    guard.complete();
}

/// Clones `src` into uninitialized `dst`.
///
/// Same failure behavior as [`construct_with`].
///
/// # Safety
///
/// `dst` must be valid for `src.len()` writes, hold no live elements and not
/// overlap `src`.
pub unsafe fn copy_into<T, A>(alloc: &A, src: &[T], dst: NonNull<T>)
where
    T: Clone,
    A: Allocator,
{
    // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller
    unsafe { construct_with(alloc, dst, src.len(), |i| src[i].clone()) };
}
