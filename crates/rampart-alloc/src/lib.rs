// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator capability consumed by rampart containers.
//!
//! Containers never talk to the heap directly. Everything that touches raw
//! storage or element lifecycle goes through the [`Allocator`] trait:
//!
//! - **Raw storage**: `allocate`, `deallocate`, `max_size`
//! - **Element lifecycle**: `construct`, `destroy`, `relocate_one`
//! - **Container propagation**: `select_on_copy` and the `PROPAGATE_ON_*` flags
//! - **Equality**: the `PartialEq` supertrait decides whether one allocator may
//!   release storage produced by another
//!
//! [`Global`] is the default allocator and forwards to `alloc::alloc`.
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//! use rampart_alloc::{AllocError, Allocator, Global};
//!
//! fn example() -> Result<(), AllocError> {
//!     let layout = Layout::array::<u64>(4).expect("small layout");
//!     let ptr = Global.allocate(layout)?;
//!
//!     // SAFETY: `ptr` was returned by `Global.allocate` with this exact layout.
//!     unsafe { Global.deallocate(ptr, layout) };
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Intercepting element lifecycle
//!
//! An allocator that overrides `construct`, `destroy` or `relocate_one` must
//! also set `OBSERVES_LIFECYCLE = true`. Containers then route every element
//! through the hooks instead of taking the bulk `memcpy` fast paths.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod allocator;
mod error;
mod global;

#[cfg(test)]
mod tests;

pub use allocator::Allocator;
pub use error::AllocError;
pub use global::Global;
