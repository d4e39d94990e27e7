// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::Cell;
use core::mem::MaybeUninit;
use core::ptr::NonNull;
use std::rc::Rc;

use crate::{AllocError, Allocator, Global};

/// Allocator that only implements the required methods.
#[derive(Debug, Clone, PartialEq)]
struct Minimal;

impl Allocator for Minimal {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        Global.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded contract
        unsafe { Global.deallocate(ptr, layout) }
    }
}

struct DropFlag(Rc<Cell<usize>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

// =============================================================================
// default hooks
// =============================================================================

#[test]
fn test_default_flags() {
    assert!(!Minimal::PROPAGATE_ON_COPY);
    assert!(Minimal::PROPAGATE_ON_MOVE);
    assert!(!Minimal::PROPAGATE_ON_SWAP);
    assert!(!Minimal::OBSERVES_LIFECYCLE);
}

#[test]
fn test_default_construct_and_destroy() {
    let drops = Rc::new(Cell::new(0));
    let mut slot = MaybeUninit::<DropFlag>::uninit();
    let ptr = NonNull::new(slot.as_mut_ptr()).expect("stack slot is non-null");

    // SAFETY: slot is uninitialized, then initialized, then destroyed once
    unsafe {
        Minimal.construct(ptr, DropFlag(drops.clone()));
        assert_eq!(drops.get(), 0);

        Minimal.destroy(ptr);
    }

    assert_eq!(drops.get(), 1);
}

#[test]
fn test_default_relocate_one_copies_bits() {
    let mut from = MaybeUninit::new(String::from("relocated"));
    let mut to = MaybeUninit::<String>::uninit();

    // SAFETY: `from` is live and disjoint from uninitialized `to`; ownership moves to `to`
    let moved = unsafe {
        Minimal.relocate_one(
            NonNull::new(from.as_mut_ptr()).expect("non-null"),
            NonNull::new(to.as_mut_ptr()).expect("non-null"),
        );
        to.assume_init()
    };

    assert_eq!(moved, "relocated");
}

#[test]
fn test_default_select_on_copy_clones() {
    assert_eq!(Minimal.select_on_copy(), Minimal);
}
