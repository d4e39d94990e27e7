// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::AllocError;

/// Capability set a container needs from its allocator.
///
/// Raw storage is requested by [`Layout`]; containers convert element counts
/// into layouts themselves. The lifecycle hooks have default bodies that do
/// exactly what the language would do, so most allocators only implement
/// `allocate` and `deallocate`.
///
/// # Equality
///
/// Two allocators compare equal when storage allocated by one may be released
/// by the other. Containers use this to decide whether a block can change
/// hands or elements have to be moved one by one.
///
/// # Safety contract of the hooks
///
/// - `construct` takes ownership of `value`. If it panics, `value` must have
///   been dropped (or written) and `slot` is considered uninitialized.
/// - `relocate_one` must leave an exact bitwise copy of `*from` in `*to`. It
///   may scrub `*from` afterwards. If it panics, `*from` must still own the
///   element and `*to` is considered uninitialized.
/// - `destroy` drops the element in place.
pub trait Allocator: PartialEq {
    /// Whether a copy-assigned container takes the source's allocator.
    const PROPAGATE_ON_COPY: bool = false;

    /// Whether a move-assigned container takes the source's allocator.
    const PROPAGATE_ON_MOVE: bool = true;

    /// Whether swapping two containers is allowed with unequal allocators.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Set when `construct`, `destroy` or `relocate_one` are overridden.
    ///
    /// Disables the bulk fast paths so every element passes through the hooks.
    const OBSERVES_LIFECYCLE: bool = false;

    /// Allocates a block for `layout`.
    ///
    /// Callers never pass a zero-sized layout.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the request cannot be satisfied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator (or one comparing
    /// equal) with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Largest number of `T` a single block may hold.
    fn max_size<T>(&self) -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    /// Writes `value` into uninitialized `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes, properly aligned and uninitialized.
    #[inline]
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `slot` is writable and uninitialized
        unsafe { slot.as_ptr().write(value) };
    }

    /// Drops the element living in `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must hold an initialized `T` that is not used afterwards.
    #[inline]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `slot` holds a live `T`
        unsafe { ptr::drop_in_place(slot.as_ptr()) };
    }

    /// Moves the element at `from` into uninitialized `to`.
    ///
    /// # Safety
    ///
    /// `from` must hold a live `T`, `to` must be writable and uninitialized,
    /// and the two must not overlap.
    #[inline]
    unsafe fn relocate_one<T>(&self, from: NonNull<T>, to: NonNull<T>) {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees both slots are valid and disjoint
        unsafe { ptr::copy_nonoverlapping(from.as_ptr(), to.as_ptr(), 1) };
    }

    /// Allocator a copy-constructed container should use.
    fn select_on_copy(&self) -> Self
    where
        Self: Clone,
    {
        self.clone()
    }
}
