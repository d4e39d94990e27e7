// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-alloc.

use core::alloc::Layout;

use thiserror::Error;

/// The allocator could not provide a block for the requested layout.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("allocation of {size} bytes (align {align}) failed")]
pub struct AllocError {
    /// Requested size in bytes.
    pub size: usize,
    /// Requested alignment in bytes.
    pub align: usize,
}

impl AllocError {
    /// Creates an `AllocError` describing a failed request for `layout`.
    pub fn for_layout(layout: Layout) -> Self {
        Self {
            size: layout.size(),
            align: layout.align(),
        }
    }
}
