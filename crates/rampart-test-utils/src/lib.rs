// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for rampart crates.
//!
//! - [`TrackingAllocator`]: counts every allocator call, checks that blocks
//!   come back with the layout they were handed out with, and fails or
//!   panics on demand through [`AllocatorBehaviour`].
//! - [`PinnedAllocator`]: same, but never propagates on copy, move or swap.
//! - [`Tracker`] / [`Tracked`]: elements that count live instances and can
//!   be told to panic on the Nth clone or drop.
//!
//! ## License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

mod panics;
mod tracked;
mod tracking_allocator;

pub use panics::catch_panic;
pub use tracked::{Tracked, Tracker};
pub use tracking_allocator::{AllocatorBehaviour, AllocatorStats, PinnedAllocator, TrackingAllocator};
