// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Allocator-aware containers that keep their state when things go wrong.</em></p>
//!
//! ---
//!
//! Rampart is a `no_std` container library built around one promise: a
//! mutation that fails leaves the container exactly as it found it.
//! Failures come in two flavours and both are covered:
//!
//! - **Allocation failure** is reported as a [`VectorError`], never as an abort
//! - **Panics** from element constructors, clones or allocator hooks unwind
//!   through rollback guards that restore the pre-call state
//!
//! # Features
//!
//! - 🧱 **Strong guarantee** on growth, insertion, copy construction and reserve
//! - 🔌 **Pluggable allocators** through the [`Allocator`] trait, including
//!   element lifecycle hooks and propagation policies
//! - 🪂 **Fallible API**: every operation that may allocate returns `Result`
//! - 📦 **`no_std` compatible**: only `alloc` is required
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! rampart = { version = "0.1.0-rc.4", features = ["full"] }
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rampart::{Vector, VectorError};
//!
//! fn main() -> Result<(), VectorError> {
//!     let mut vector = Vector::new();
//!
//!     for value in 1..=5 {
//!         vector.push(value)?;
//!     }
//!     vector.insert(2, 99)?;
//!     vector.erase_range(0..2);
//!
//!     assert_eq!(vector, [99, 3, 4, 5]);
//!
//!     vector.reserve(100)?;
//!     vector.shrink_to_fit();
//!     assert_eq!(vector.capacity(), 4);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`alloc`] | `rampart-alloc` | `Allocator`, `Global`, `AllocError` |
//! | [`guard`] | `rampart-guard` | `ExceptionGuard` |
//! | [`vec`] | `rampart-vec` | `Vector`, `ReallocationBuffer`, `Cursor`, relocation primitives |
//!
//! # Testing
//!
//! With the `test-utils` feature, [`support::test_utils`] exposes the
//! failure-injecting `TrackingAllocator` and the `Tracked` counting element
//! used by rampart's own test suites.
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use rampart_alloc as alloc;
pub use rampart_guard as guard;
pub use rampart_vec as vec;

pub use rampart_alloc::{AllocError, Allocator, Global};
pub use rampart_guard::ExceptionGuard;
pub use rampart_vec::{Cursor, Vector, VectorError};
