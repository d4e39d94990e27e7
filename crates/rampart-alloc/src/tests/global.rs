// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;

use crate::{Allocator, Global};

// =============================================================================
// allocate() / deallocate()
// =============================================================================

#[test]
fn test_allocate_returns_aligned_block() {
    let layout = Layout::array::<u64>(16).expect("Failed to compute layout");
    let ptr = Global.allocate(layout).expect("Failed to allocate(..)");

    assert_eq!(ptr.as_ptr() as usize % layout.align(), 0);

    // SAFETY: ptr was just allocated by Global with this layout
    unsafe {
        ptr.as_ptr().write_bytes(0xAB, layout.size());
        assert_eq!(*ptr.as_ptr().add(layout.size() - 1), 0xAB);
        Global.deallocate(ptr, layout);
    }
}

#[test]
fn test_allocate_over_aligned_layout() {
    let layout = Layout::from_size_align(64, 64).expect("Failed to compute layout");
    let ptr = Global.allocate(layout).expect("Failed to allocate(..)");

    assert_eq!(ptr.as_ptr() as usize % 64, 0);

    // SAFETY: ptr was just allocated by Global with this layout
    unsafe { Global.deallocate(ptr, layout) };
}

// =============================================================================
// equality and propagation
// =============================================================================

#[test]
fn test_global_instances_compare_equal() {
    assert_eq!(Global, Global);
    assert_eq!(Global.select_on_copy(), Global);
}

#[test]
fn test_global_propagation_flags() {
    assert!(!Global::PROPAGATE_ON_COPY);
    assert!(Global::PROPAGATE_ON_MOVE);
    assert!(Global::PROPAGATE_ON_SWAP);
    assert!(!Global::OBSERVES_LIFECYCLE);
}

// =============================================================================
// max_size()
// =============================================================================

#[test]
fn test_max_size_scales_with_element_size() {
    assert_eq!(Global.max_size::<u8>(), isize::MAX as usize);
    assert_eq!(Global.max_size::<u64>(), isize::MAX as usize / 8);
    assert_eq!(Global.max_size::<[u8; 3]>(), isize::MAX as usize / 3);
}

#[test]
fn test_max_size_zero_sized() {
    assert_eq!(Global.max_size::<()>(), usize::MAX);
}
