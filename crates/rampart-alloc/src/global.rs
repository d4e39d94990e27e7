// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Global - heap allocator backed by `alloc::alloc`.

use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::ptr::NonNull;

use crate::allocator::Allocator;
use crate::error::AllocError;

/// The process-wide heap.
///
/// Zero-sized and stateless: every `Global` compares equal to every other, so
/// containers using it can always hand blocks to each other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

impl Allocator for Global {
    const PROPAGATE_ON_SWAP: bool = true;

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "zero-sized requests never reach the allocator");

        // SAFETY (PRECONDITIONS ARE MET): layout has a non-zero size
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw).ok_or_else(|| AllocError::for_layout(layout))?;

        tracing::trace!(size = layout.size(), align = layout.align(), "global allocate");

        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        tracing::trace!(size = layout.size(), align = layout.align(), "global deallocate");

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `ptr` came from `allocate` with `layout`
        unsafe { dealloc(ptr.as_ptr(), layout) };
    }
}
