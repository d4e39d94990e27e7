// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// Runs `f`, returning `None` if it panicked.
///
/// Injected panics are expected in these tests, so unwind safety is asserted.
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Option<R> {
    catch_unwind(AssertUnwindSafe(f)).ok()
}
