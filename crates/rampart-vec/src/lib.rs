// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator-parameterized vector that survives failures intact.
//!
//! [`Vector<T, A>`] stores its elements in one contiguous block obtained from
//! an [`Allocator`](rampart_alloc::Allocator). Two kinds of failure are
//! handled:
//!
//! - **Recoverable errors** (capacity overflow, allocation failure, checked
//!   access out of bounds) come back as [`VectorError`].
//! - **Panics** from element code (`Clone`, `Default`, constructor closures,
//!   iterators) or from allocator lifecycle hooks unwind through rollback
//!   guards, which restore the vector before the panic continues.
//!
//! Every allocating operation and every in-place insertion is all or
//! nothing. Erasure, truncation and clearing keep the vector valid if a
//! destructor panics.
//!
//! # Growth
//!
//! Storage is never resized in place. When spare capacity runs out, a
//! [`ReallocationBuffer`] receives the new elements first, then the existing
//! elements are relocated around them and the blocks are exchanged. The
//! capacity of the new block doubles the old one, or matches the requested
//! size if that is larger, saturating at `max_size()`.
//!
//! # Example
//!
//! ```rust
//! use rampart_vec::{Vector, VectorError};
//!
//! fn example() -> Result<(), VectorError> {
//!     let mut vector = Vector::from_slice(&[1, 2, 3, 4, 5])?;
//!
//!     vector.resize(3)?;
//!     vector.resize_value(5, &9)?;
//!     assert_eq!(vector.as_slice(), [1, 2, 3, 9, 9]);
//!
//!     vector.insert_from_within(0, 4)?;
//!     assert_eq!(vector.front(), Some(&9));
//!
//!     assert!(matches!(
//!         vector.at(42),
//!         Err(VectorError::IndexOutOfBounds { index: 42, length: 6 })
//!     ));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod assign;
mod buffer;
mod cursor;
mod error;
mod insert;
mod relocate;
mod slots;
mod vector;

#[cfg(test)]
mod tests;

pub use buffer::{MIN_UNBOUNDED_CAPACITY, ReallocationBuffer};
pub use cursor::Cursor;
pub use error::VectorError;
pub use relocate::{Relocation, construct_with, copy_into, relocate};
pub use vector::Vector;
