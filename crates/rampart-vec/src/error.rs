// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-vec.

use rampart_alloc::AllocError;
use thiserror::Error;

/// Recoverable failures of [`Vector`](crate::Vector) operations.
///
/// Panics raised by element code (`Clone`, `Default`, constructor closures,
/// iterators) are not errors: they unwind after the vector has rolled back.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VectorError {
    /// The requested size exceeds what the allocator can address.
    #[error("requested capacity {requested} exceeds max_size {max}")]
    CapacityOverflow {
        /// Number of elements that were requested.
        requested: usize,
        /// `max_size()` at the time of the request.
        max: usize,
    },

    /// Checked access past the end.
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// Index that was requested.
        index: usize,
        /// Length of the vector.
        length: usize,
    },

    /// The allocator refused the request.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),
}
