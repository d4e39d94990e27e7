// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Insertion and erasure in the middle of a [`Vector`].

use core::cell::Cell;
use core::iter;
use core::ops::{Bound, RangeBounds};
use core::ptr;
use core::slice;

use rampart_alloc::Allocator;
use rampart_guard::ExceptionGuard;

use crate::buffer::ReallocationBuffer;
use crate::error::VectorError;
use crate::relocate::{construct_with, destroy_range, relocate};
use crate::vector::{Vector, recommend};

impl<T, A: Allocator> Vector<T, A> {
    /// Inserts `value` at `index`, shifting the tail right.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// See [`Vector::emplace`]. `value` is dropped.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, VectorError> {
        self.emplace(index, move || value)
    }

    /// Inserts the value built by `produce` at `index`.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] or [`VectorError::Alloc`] when the
    /// vector has to grow and cannot. The vector is unchanged, and also if
    /// `produce` panics.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    pub fn emplace<F>(&mut self, index: usize, produce: F) -> Result<usize, VectorError>
    where
        F: FnOnce() -> T,
    {
        self.assert_insert_index(index);

        if self.len == self.capacity() {
            self.reallocate_around(index, 1, |buffer| {
                buffer.emplace_with(produce);
            })?;

            return Ok(index);
        }

        let value = produce();
        let (slots, len, alloc) = self.parts();
        let tail = *len - index;

        // SAFETY (PRECONDITIONS ARE MET): len < capacity, so [index, len] shifted by one stays in the block
        unsafe {
            let gap = slots.slot(index);
            ptr::copy(gap.as_ptr(), gap.add(1).as_ptr(), tail);

            let guard = ExceptionGuard::new(|| ptr::copy(gap.add(1).as_ptr(), gap.as_ptr(), tail));
            alloc.construct(gap, value);
            guard.complete();
        }
        *len += 1;

        Ok(index)
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] or [`VectorError::Alloc`] when the
    /// vector has to grow and cannot. The vector is unchanged, and also if a
    /// clone panics.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<usize, VectorError>
    where
        T: Clone,
    {
        self.assert_insert_index(index);

        if count == 0 {
            return Ok(index);
        }

        if count <= self.capacity() - self.len {
            // SAFETY (PRECONDITIONS ARE MET): index <= len and count slots are spare
            unsafe { self.fill_gap(index, count, |_| value.clone()) };
        } else {
            self.reallocate_around(index, count, |buffer| {
                buffer.extend_with(count, || value.clone());
            })?;
        }

        Ok(index)
    }

    /// Inserts clones of `src` at `index`.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Vector::insert_n`].
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    pub fn insert_from_slice(&mut self, index: usize, src: &[T]) -> Result<usize, VectorError>
    where
        T: Clone,
    {
        self.assert_insert_index(index);

        let count = src.len();
        if count == 0 {
            return Ok(index);
        }

        if count <= self.capacity() - self.len {
            // SAFETY (PRECONDITIONS ARE MET): index <= len and count slots are spare
            unsafe { self.fill_gap(index, count, |i| src[i].clone()) };
        } else {
            self.reallocate_around(index, count, |buffer| buffer.extend_cloned(src))?;
        }

        Ok(index)
    }

    /// Inserts at `index` a clone of the element currently at `src`.
    ///
    /// Equivalent to cloning `self[src]` first and inserting the clone, even
    /// though the element moves when `src >= index`.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Vector::insert_n`].
    ///
    /// # Panics
    ///
    /// If `index > len()` or `src >= len()`.
    pub fn insert_from_within(&mut self, index: usize, src: usize) -> Result<usize, VectorError>
    where
        T: Clone,
    {
        self.assert_insert_index(index);
        assert!(src < self.len, "source index (is {src}) should be < len (is {})", self.len);

        if self.len == self.capacity() {
            // SAFETY (PRECONDITIONS ARE MET): src < len
            let source = unsafe { self.slots.slot(src) };

            // The old block is untouched until the clone sits in the buffer.
            self.reallocate_around(index, 1, |buffer| {
                // SAFETY (PRECONDITIONS ARE MET): the vector's elements are still in place
                buffer.emplace_with(|| unsafe { source.as_ref() }.clone());
            })?;

            return Ok(index);
        }

        let shifted = if src >= index { src + 1 } else { src };
        // SAFETY (PRECONDITIONS ARE MET): shifted <= len < capacity
        let source = unsafe { self.slots.slot(shifted) };

        // SAFETY (PRECONDITIONS ARE MET): one spare slot; `source` is read after the shift, where it now lives
        unsafe { self.fill_gap(index, 1, |_| source.as_ref().clone()) };

        Ok(index)
    }

    /// Inserts every item of a single-pass iterator at `index`.
    ///
    /// Items are first built into spare capacity at the end. If the iterator
    /// runs out there, the new items are rotated into place. Otherwise the
    /// remaining items are collected into a scratch buffer and everything is
    /// merged into one block sized by the growth policy.
    ///
    /// Returns `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] or [`VectorError::Alloc`]. The
    /// vector is unchanged, and also if the iterator panics; items already
    /// taken from the iterator are dropped.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    pub fn insert_iter<I>(&mut self, index: usize, items: I) -> Result<usize, VectorError>
    where
        I: IntoIterator<Item = T>,
    {
        self.assert_insert_index(index);

        let max = self.max_size();
        let (slots, len, alloc) = self.parts();
        let old_len = *len;
        let spare_slots = slots.capacity() - old_len;
        let mut items = items.into_iter();

        // SAFETY (PRECONDITIONS ARE MET): old_len <= capacity
        let spare = unsafe { slots.slot(old_len) };
        let appended = Cell::new(0usize);

        let guard = ExceptionGuard::new(|| {
            for i in (0..appended.get()).rev() {
                // SAFETY (PRECONDITIONS ARE MET): slot i past the end was constructed below
                unsafe { alloc.destroy(spare.add(i)) };
            }
        });

        // 1. Build into spare capacity, past the live elements.
        let mut overflow = None;
        for item in items.by_ref() {
            if appended.get() == spare_slots {
                overflow = Some(item);
                break;
            }

            // SAFETY (PRECONDITIONS ARE MET): appended < spare_slots
            unsafe { alloc.construct(spare.add(appended.get()), item) };
            appended.set(appended.get() + 1);
        }

        let Some(first_overflow) = overflow else {
            // 2. Everything fit: rotate the new items into place.
            *len = old_len + appended.get();
            guard.complete();

            // SAFETY (PRECONDITIONS ARE MET): [0, len) is live
            let elements = unsafe { slice::from_raw_parts_mut(slots.as_ptr(), *len) };
            elements[index..].rotate_left(old_len - index);

            return Ok(index);
        };

        // 3. Collect the rest into a self-growing scratch buffer.
        let mut side = ReallocationBuffer::new(alloc);
        side.extend_unbounded(iter::once(first_overflow).chain(items))?;

        // 4. Merge into one block: [0, index), appended, side, [index, old_len).
        let new_len = (old_len + appended.get())
            .checked_add(side.len())
            .ok_or(VectorError::CapacityOverflow {
                requested: usize::MAX,
                max,
            })?;
        let capacity = recommend(slots.capacity(), max, new_len)?;

        let mut merged = ReallocationBuffer::with_capacity(alloc, capacity)?;
        merged.open_at(index);

        // SAFETY (PRECONDITIONS ARE MET): `appended` live slots past the end, fresh room at `index`
        unsafe {
            relocate(alloc, spare, merged.slot(index), appended.get());
            merged.adopt_relocated(0, appended.get());
        }
        appended.set(0);

        merged.append_relocated(&mut side);

        // SAFETY (PRECONDITIONS ARE MET): window sits at `index <= len` with room for the suffix
        unsafe { merged.swap_in(slots, len) };
        guard.complete();

        Ok(index)
    }

    /// Removes the element at `index`, shifting the tail left.
    ///
    /// Returns `index`, now the position of the element that followed the
    /// removed one (`len()` when there is none).
    ///
    /// # Panics
    ///
    /// If `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        assert!(index < self.len, "erase index (is {index}) should be < len (is {})", self.len);

        self.erase_range(index..index + 1)
    }

    /// Removes the elements in `range`, shifting the tail left.
    ///
    /// Returns the start of the range, now the position of the element that
    /// followed it. If a destructor panics, the rest of the range is still
    /// destroyed and the gap is still closed.
    ///
    /// # Panics
    ///
    /// If the range is decreasing or extends past `len()`.
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => {
                let Some(start) = start.checked_add(1) else {
                    panic!("attempted to erase from after usize::MAX");
                };
                start
            }
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => {
                let Some(end) = end.checked_add(1) else {
                    panic!("attempted to erase up to and including usize::MAX");
                };
                end
            }
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };

        assert!(start <= end, "erase range starts at {start} but ends at {end}");
        assert!(end <= self.len, "erase range end (is {end}) should be <= len (is {})", self.len);

        let count = end - start;
        if count == 0 {
            return start;
        }

        let (slots, len, alloc) = self.parts();
        let tail = *len - end;
        *len = start;

        // SAFETY (PRECONDITIONS ARE MET): [start, end) is live and no longer counted
        unsafe {
            let gap = slots.slot(start);

            // Not completed: closes the gap on success and on unwind alike.
            let _close_gap = ExceptionGuard::new(|| {
                ptr::copy(gap.add(count).as_ptr(), gap.as_ptr(), tail);
                *len = start + tail;
            });

            destroy_range(alloc, gap, count);
        }

        start
    }

    /// Shifts `[index, len)` right by `count` and fills the gap with
    /// `produce(0..count)`.
    ///
    /// If `produce` or a construct hook panics, the built elements are
    /// destroyed and the tail moves back.
    ///
    /// # Safety
    ///
    /// `index <= len()` and `count <= capacity() - len()`.
    pub(crate) unsafe fn fill_gap<F>(&mut self, index: usize, count: usize, produce: F)
    where
        F: FnMut(usize) -> T,
    {
        let (slots, len, alloc) = self.parts();
        let tail = *len - index;

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees room for `count` more elements
        unsafe {
            let gap = slots.slot(index);
            ptr::copy(gap.as_ptr(), gap.add(count).as_ptr(), tail);

            let guard = ExceptionGuard::new(|| ptr::copy(gap.add(count).as_ptr(), gap.as_ptr(), tail));
            construct_with(alloc, gap, count, produce);
            guard.complete();
        }

        *len += count;
    }

    #[inline(always)]
    pub(crate) fn assert_insert_index(&self, index: usize) {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
    }
}
