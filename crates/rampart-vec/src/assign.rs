// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Resizing and whole-content assignment.

use core::cmp;
use core::mem;

use rampart_alloc::Allocator;

use crate::error::VectorError;
use crate::relocate::relocate;
use crate::slots::RawSlots;
use crate::vector::Vector;

impl<T, A: Allocator> Vector<T, A> {
    /// Resizes to `len`, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// See [`Vector::resize_with`].
    #[inline]
    pub fn resize(&mut self, len: usize) -> Result<(), VectorError>
    where
        T: Default,
    {
        self.resize_with(len, T::default)
    }

    /// Resizes to `len`, filling new slots with clones of `value`.
    ///
    /// # Errors
    ///
    /// See [`Vector::resize_with`].
    #[inline]
    pub fn resize_value(&mut self, len: usize, value: &T) -> Result<(), VectorError>
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    /// Resizes to `len`, filling new slots with `produce()`.
    ///
    /// Shrinking destroys the tail. Growing builds the new elements in spare
    /// capacity, or in a block sized by the growth policy for `len`.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] or [`VectorError::Alloc`] when the
    /// vector has to grow and cannot. The vector is unchanged, and also if
    /// `produce` panics.
    pub fn resize_with<F>(&mut self, len: usize, mut produce: F) -> Result<(), VectorError>
    where
        F: FnMut() -> T,
    {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }

        let count = len - self.len;
        let index = self.len;

        if len <= self.capacity() {
            // SAFETY (PRECONDITIONS ARE MET): count slots are spare, gap opens at the end
            unsafe { self.fill_gap(index, count, |_| produce()) };
            return Ok(());
        }

        self.reallocate_around(index, count, |buffer| buffer.extend_with(count, produce))
    }

    /// Replaces the contents with `len` clones of `value`.
    ///
    /// Existing elements are overwritten with `clone_from`. When `len`
    /// exceeds the capacity, the new contents are built in a fresh block
    /// first and the old elements are destroyed only once that succeeded.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] or [`VectorError::Alloc`] when a
    /// fresh block is needed and cannot be had. The vector is unchanged.
    pub fn assign_n(&mut self, len: usize, value: &T) -> Result<(), VectorError>
    where
        T: Clone,
    {
        if len > self.capacity() {
            let capacity = self.recommend(len)?;
            return self.replace_storage(capacity, |buffer| buffer.extend_with(len, || value.clone()));
        }

        let common = cmp::min(self.len, len);
        for element in &mut self.as_mut_slice()[..common] {
            element.clone_from(value);
        }

        if len <= self.len {
            self.truncate(len);
        } else {
            let index = self.len;
            // SAFETY (PRECONDITIONS ARE MET): len <= capacity, gap opens at the end
            unsafe { self.fill_gap(index, len - index, |_| value.clone()) };
        }

        Ok(())
    }

    /// Replaces the contents with clones of `src`.
    ///
    /// Same strategy as [`Vector::assign_n`].
    ///
    /// # Errors
    ///
    /// Same as [`Vector::assign_n`].
    pub fn assign_from_slice(&mut self, src: &[T]) -> Result<(), VectorError>
    where
        T: Clone,
    {
        let len = src.len();

        if len > self.capacity() {
            let capacity = self.recommend(len)?;
            return self.replace_storage(capacity, |buffer| buffer.extend_cloned(src));
        }

        let common = cmp::min(self.len, len);
        self.as_mut_slice()[..common].clone_from_slice(&src[..common]);

        if len <= self.len {
            self.truncate(len);
        } else {
            let index = self.len;
            // SAFETY (PRECONDITIONS ARE MET): len <= capacity, gap opens at the end
            unsafe { self.fill_gap(index, len - index, |i| src[index + i].clone()) };
        }

        Ok(())
    }

    /// Replaces the contents with the items of a single-pass iterator.
    ///
    /// Existing elements are overwritten while both last; then either the
    /// leftover elements are destroyed or the leftover items are pushed.
    ///
    /// # Errors
    ///
    /// Any error from [`Vector::push`]. Items assigned so far stay.
    pub fn assign_iter<I>(&mut self, items: I) -> Result<(), VectorError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter();
        let mut assigned = 0;

        for (element, item) in self.as_mut_slice().iter_mut().zip(items.by_ref()) {
            *element = item;
            assigned += 1;
        }

        if assigned < self.len {
            self.truncate(assigned);
            return Ok(());
        }

        for item in items {
            self.push(item)?;
        }

        Ok(())
    }

    /// Copy assignment.
    ///
    /// If `A::PROPAGATE_ON_COPY`, the allocator is replaced by a clone of
    /// `other`'s first; the current block is given back when the two differ.
    /// Then the contents are assigned as by [`Vector::assign_from_slice`].
    ///
    /// # Errors
    ///
    /// Same as [`Vector::assign_n`].
    pub fn copy_assign(&mut self, other: &Self) -> Result<(), VectorError>
    where
        T: Clone,
        A: Clone,
    {
        if A::PROPAGATE_ON_COPY {
            if self.alloc != other.alloc {
                self.clear();
                // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc` and holds no live elements
                unsafe { self.slots.release(&self.alloc) };
            }

            self.alloc = other.alloc.clone();
        }

        self.assign_from_slice(other.as_slice())
    }

    /// Move assignment.
    ///
    /// If `A::PROPAGATE_ON_MOVE`, `other` replaces `self` wholesale. With
    /// equal allocators the block of `other` is adopted and the allocator
    /// kept. Otherwise the elements of `other` are relocated into storage
    /// from this vector's allocator.
    ///
    /// # Errors
    ///
    /// Only in the last case, if a block for `other.len()` elements cannot
    /// be allocated. The vector is unchanged and `other` is dropped.
    pub fn move_assign(&mut self, mut other: Self) -> Result<(), VectorError> {
        if A::PROPAGATE_ON_MOVE {
            *self = other;
            return Ok(());
        }

        if self.alloc == other.alloc {
            self.clear();
            // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc` and holds no live elements
            unsafe { self.slots.release(&self.alloc) };

            self.slots = mem::replace(&mut other.slots, RawSlots::dangling());
            self.len = mem::take(&mut other.len);
            return Ok(());
        }

        if self.capacity() < other.len {
            let fresh = RawSlots::allocate(&self.alloc, other.len)?;

            self.clear();
            // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc` and holds no live elements
            unsafe { self.slots.release(&self.alloc) };
            self.slots = fresh;
        } else {
            self.clear();
        }

        // SAFETY (PRECONDITIONS ARE MET): other holds `len` live elements, our block has room for them
        unsafe { relocate(&self.alloc, other.slots.slot(0), self.slots.slot(0), other.len) };
        self.len = mem::take(&mut other.len);

        Ok(())
    }
}
