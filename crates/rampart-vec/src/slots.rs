// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use rampart_alloc::Allocator;

use crate::error::VectorError;

/// Start pointer and capacity of one storage block.
///
/// Knows nothing about which slots are initialized; owners track that.
/// Zero-sized `T` never reaches the allocator: the pointer stays dangling and
/// any capacity is free.
pub(crate) struct RawSlots<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawSlots<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `cap` slots from `alloc`.
    pub(crate) fn allocate<A: Allocator>(alloc: &A, cap: usize) -> Result<Self, VectorError> {
        let max = alloc.max_size::<T>();

        if cap > max {
            return Err(VectorError::CapacityOverflow {
                requested: cap,
                max,
            });
        }

        if cap == 0 || Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(cap).map_err(|_| VectorError::CapacityOverflow {
            requested: cap,
            max,
        })?;
        let ptr = alloc.allocate(layout)?;

        Ok(Self {
            ptr: ptr.cast(),
            cap,
            _marker: PhantomData,
        })
    }

    /// Returns the block to `alloc` and becomes dangling.
    ///
    /// # Safety
    ///
    /// The block must come from `alloc` (or an allocator comparing equal) and
    /// hold no live elements.
    pub(crate) unsafe fn release<A: Allocator>(&mut self, alloc: &A) {
        if self.cap != 0 && !Self::IS_ZST {
            // SAFETY (PRECONDITIONS ARE MET): the same layout was validated by `allocate`
            unsafe {
                let layout =
                    Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>());
                alloc.deallocate(self.ptr.cast(), layout);
            }
        }

        *self = Self::dangling();
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= capacity()`.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index <= self.cap);
        // SAFETY (PRECONDITIONS ARE MET): stays within the block or one past its end
        unsafe { self.ptr.add(index) }
    }
}
