// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! rampart_guard - Rollback on unwind
//!
//! Provides [`ExceptionGuard`], a scope guard holding a rollback action.
//! Multi-step mutations arm a guard before the first step and call
//! [`ExceptionGuard::complete`] after the last one. If anything in between
//! panics, unwinding drops the guard and the rollback runs exactly once.
//!
//! Progress that the rollback needs (how many slots were filled, how far a
//! relocation got) is usually shared through a [`core::cell::Cell`] that the
//! closure borrows.
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use rampart_guard::ExceptionGuard;
//!
//! let undone = Cell::new(false);
//!
//! let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
//!     let _guard = ExceptionGuard::new(|| undone.set(true));
//!     panic!("step failed");
//! }));
//!
//! assert!(result.is_err());
//! assert!(undone.get());
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]


use core::fmt;
use core::mem::ManuallyDrop;

/// Runs a rollback action on drop unless marked complete.
///
/// The guard is neither `Clone` nor `Copy`: exactly one owner is responsible
/// for the rollback. Moving the guard moves that responsibility.
#[must_use = "dropping the guard immediately runs the rollback"]
pub struct ExceptionGuard<F>
where
    F: FnOnce(),
{
    rollback: ManuallyDrop<F>,
    completed: bool,
}

impl<F> fmt::Debug for ExceptionGuard<F>
where
    F: FnOnce(),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionGuard")
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl<F> ExceptionGuard<F>
where
    F: FnOnce(),
{
    /// Arms a guard with `rollback`.
    #[inline(always)]
    pub fn new(rollback: F) -> Self {
        Self {
            rollback: ManuallyDrop::new(rollback),
            completed: false,
        }
    }

    /// Disarms the guard. The rollback is dropped without being called.
    #[inline(always)]
    pub fn complete(mut self) {
        self.completed = true;
    }
}

impl<F> Drop for ExceptionGuard<F>
where
    F: FnOnce(),
{
    fn drop(&mut self) {
        // SAFETY (PRECONDITIONS ARE MET): `rollback` is taken exactly once, here
        let rollback = unsafe { ManuallyDrop::take(&mut self.rollback) };

        if !self.completed {
            rollback();
        }
    }
}
