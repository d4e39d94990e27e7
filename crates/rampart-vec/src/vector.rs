// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::{self, Ordering};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut};
use core::slice;

use rampart_alloc::{Allocator, Global};
use rampart_guard::ExceptionGuard;

use crate::buffer::ReallocationBuffer;
use crate::cursor::Cursor;
use crate::error::VectorError;
use crate::relocate::{copy_into, destroy_range, relocate};
use crate::slots::RawSlots;

/// Growth policy: capacity to allocate so that `new_size` elements fit.
///
/// Doubles the current capacity (or jumps straight to `new_size` when that
/// is larger), saturating at `max`.
pub(crate) fn recommend(capacity: usize, max: usize, new_size: usize) -> Result<usize, VectorError> {
    if new_size > max {
        return Err(VectorError::CapacityOverflow {
            requested: new_size,
            max,
        });
    }

    if capacity >= max / 2 {
        return Ok(max);
    }

    Ok(cmp::max(2 * capacity, new_size))
}

/// Destroys the elements past `new_len` and sets `*len = new_len`.
///
/// `len` is lowered before the first destroy, so a panicking destructor
/// leaves the prefix consistent; the rest of the tail is still destroyed.
pub(crate) fn truncate_in<T, A: Allocator>(slots: &RawSlots<T>, len: &mut usize, alloc: &A, new_len: usize) {
    if *len <= new_len {
        return;
    }

    let count = *len - new_len;
    *len = new_len;

    // SAFETY (PRECONDITIONS ARE MET): [new_len, new_len + count) was live and is no longer counted
    unsafe { destroy_range(alloc, slots.slot(new_len), count) };
}

/// Contiguous growable array whose storage comes from `A`.
///
/// Every operation that allocates or constructs elements either completes or
/// leaves the vector exactly as it was: on allocation failure the error is
/// returned, on a panic from element code (a `Clone`, a constructor closure,
/// an iterator, an allocator hook) partial work is rolled back before the
/// panic continues. Erasure only promises that the vector stays valid if a
/// destructor panics.
///
/// # Example
///
/// ```rust
/// use rampart_vec::{Vector, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vector = Vector::new();
///
///     for i in 1..=5 {
///         vector.push(i)?;
///     }
///     vector.insert(2, 99)?;
///     vector.erase_range(0..2);
///
///     assert_eq!(vector.as_slice(), [99, 3, 4, 5]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Vector<T, A: Allocator = Global> {
    pub(crate) slots: RawSlots<T>,
    pub(crate) len: usize,
    pub(crate) alloc: A,
}

// SAFETY (PRECONDITIONS ARE MET): the vector owns its elements and allocator like `Vec<T, A>`
unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
// SAFETY (PRECONDITIONS ARE MET): shared access only hands out `&T` and `&A`
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T> {
    /// Creates an empty vector. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: RawSlots::dangling(),
            len: 0,
            alloc: Global,
        }
    }

    /// Creates an empty vector with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn with_capacity(capacity: usize) -> Result<Self, VectorError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a vector of `len` default values.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_len_in`].
    pub fn with_len(len: usize) -> Result<Self, VectorError>
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// Creates a vector of `len` clones of `value`.
    ///
    /// # Errors
    ///
    /// See [`Vector::from_elem_in`].
    pub fn from_elem(len: usize, value: &T) -> Result<Self, VectorError>
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Creates a vector holding clones of `src`.
    ///
    /// # Errors
    ///
    /// See [`Vector::from_slice_in`].
    pub fn from_slice(src: &[T]) -> Result<Self, VectorError>
    where
        T: Clone,
    {
        Self::from_slice_in(src, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates an empty vector using `alloc`. Does not allocate.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self {
            slots: RawSlots::dangling(),
            len: 0,
            alloc,
        }
    }

    /// Creates an empty vector with exactly `capacity` slots from `alloc`.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] if `capacity > max_size()`,
    /// [`VectorError::Alloc`] if the allocator fails.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, VectorError> {
        let slots = RawSlots::allocate(&alloc, capacity)?;

        Ok(Self { slots, len: 0, alloc })
    }

    /// Creates a vector of `len` default values, with capacity exactly `len`.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn with_len_in(len: usize, alloc: A) -> Result<Self, VectorError>
    where
        T: Default,
    {
        let mut vector = Self::with_capacity_in(len, alloc)?;
        vector.resize_with(len, T::default)?;

        Ok(vector)
    }

    /// Creates a vector of `len` clones of `value`, with capacity exactly `len`.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn from_elem_in(len: usize, value: &T, alloc: A) -> Result<Self, VectorError>
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity_in(len, alloc)?;
        vector.resize_value(len, value)?;

        Ok(vector)
    }

    /// Creates a vector holding clones of `src`, with capacity exactly
    /// `src.len()`.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn from_slice_in(src: &[T], alloc: A) -> Result<Self, VectorError>
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity_in(src.len(), alloc)?;

        // SAFETY (PRECONDITIONS ARE MET): the block is fresh with exactly src.len() free slots
        unsafe { copy_into(&vector.alloc, src, vector.slots.slot(0)) };
        vector.len = src.len();

        Ok(vector)
    }

    /// Creates a vector from a single-pass iterator, pushing one item at a
    /// time.
    ///
    /// # Errors
    ///
    /// Any error from [`Vector::push`]. Items already pushed are dropped.
    pub fn from_iter_in<I>(items: I, alloc: A) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut vector = Self::new_in(alloc);

        for item in items {
            vector.push(item)?;
        }

        Ok(vector)
    }

    /// Copies the vector, taking the allocator from
    /// [`Allocator::select_on_copy`]. Capacity is exactly `len()`.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn try_clone(&self) -> Result<Self, VectorError>
    where
        T: Clone,
        A: Clone,
    {
        self.try_clone_in(self.alloc.select_on_copy())
    }

    /// Copies the vector into storage from `alloc`. Capacity is exactly
    /// `len()`.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`].
    pub fn try_clone_in<B: Allocator>(&self, alloc: B) -> Result<Vector<T, B>, VectorError>
    where
        T: Clone,
    {
        Vector::from_slice_in(self.as_slice(), alloc)
    }

    /// Moves `other` into a vector using `alloc`.
    ///
    /// When `alloc == other.allocator()` the block changes hands untouched.
    /// Otherwise a block of exactly `other.len()` slots is taken from `alloc`
    /// and the elements are relocated into it.
    ///
    /// # Errors
    ///
    /// See [`Vector::with_capacity_in`]. `other` and its elements are dropped.
    pub fn move_in(mut other: Self, alloc: A) -> Result<Self, VectorError> {
        if other.alloc == alloc {
            let slots = mem::replace(&mut other.slots, RawSlots::dangling());
            let len = mem::take(&mut other.len);

            return Ok(Self { slots, len, alloc });
        }

        let mut vector = Self::with_capacity_in(other.len, alloc)?;

        // SAFETY (PRECONDITIONS ARE MET): other holds `len` live elements, vector has `len` free slots
        unsafe { relocate(&vector.alloc, other.slots.slot(0), vector.slots.slot(0), other.len) };
        vector.len = mem::take(&mut other.len);

        Ok(vector)
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of slots in the current block.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Whether the vector holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest length the allocator can serve.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.alloc.max_size::<T>()
    }

    /// The allocator.
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live, the pointer is non-null and aligned
        unsafe { slice::from_raw_parts(self.slots.as_ptr(), self.len) }
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) is live and uniquely borrowed
        unsafe { slice::from_raw_parts_mut(self.slots.as_ptr(), self.len) }
    }

    /// Start of the block. Dangling when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.slots.as_ptr()
    }

    /// Mutable start of the block. Dangling when nothing is allocated.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots.as_ptr()
    }

    /// First element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// First element, mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Cursor at position 0.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor at the end position.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Cursor at `index`.
    ///
    /// # Panics
    ///
    /// If `index > len()`.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    /// Checked access.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfBounds`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let length = self.len;

        self.as_slice()
            .get(index)
            .ok_or(VectorError::IndexOutOfBounds { index, length })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfBounds`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let length = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfBounds { index, length })
    }

    /// Makes room for a total of `capacity` elements.
    ///
    /// Unlike `Vec::reserve`, `capacity` is the total, not an additional
    /// count. Allocates exactly `capacity` slots; does nothing if the
    /// current block is already large enough.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] if `capacity > max_size()`,
    /// [`VectorError::Alloc`] if the allocator fails. The vector is
    /// unchanged in both cases.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VectorError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        let max = self.max_size();
        if capacity > max {
            return Err(VectorError::CapacityOverflow {
                requested: capacity,
                max,
            });
        }

        self.reallocate_exact(capacity)
    }

    /// Drops spare capacity.
    ///
    /// An empty vector gives its block back. Otherwise the elements move to
    /// a block of exactly `len()` slots; if that allocation fails, the
    /// current block is kept.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() <= self.len {
            return;
        }

        if self.len == 0 {
            // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc` and holds no live elements
            unsafe { self.slots.release(&self.alloc) };
            return;
        }

        if let Err(error) = self.reallocate_exact(self.len) {
            tracing::debug!(
                %error,
                len = self.len,
                capacity = self.capacity(),
                "shrink_to_fit kept the current block"
            );
        }
    }

    /// Appends `value`, returning a reference to it.
    ///
    /// # Errors
    ///
    /// See [`Vector::emplace_back`]. `value` is dropped.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<&mut T, VectorError> {
        self.emplace_back(move || value)
    }

    /// Appends the value built by `produce`, returning a reference to it.
    ///
    /// With spare capacity the value is built in place. Otherwise a block
    /// from the growth policy is allocated, the value is built at offset
    /// `len()` in it, and the existing elements are relocated around it.
    ///
    /// # Errors
    ///
    /// [`VectorError::CapacityOverflow`] if the vector is at `max_size()`,
    /// [`VectorError::Alloc`] if the allocator fails. The vector is
    /// unchanged, and also if `produce` panics.
    pub fn emplace_back<F>(&mut self, produce: F) -> Result<&mut T, VectorError>
    where
        F: FnOnce() -> T,
    {
        if self.len < self.capacity() {
            let value = produce();
            // SAFETY (PRECONDITIONS ARE MET): len < capacity, so the slot is free
            unsafe { self.alloc.construct(self.slots.slot(self.len), value) };
            self.len += 1;
        } else {
            let index = self.len;
            self.reallocate_around(index, 1, |buffer| {
                buffer.emplace_with(produce);
            })?;
        }

        let last = self.len - 1;
        Ok(&mut self.as_mut_slice()[last])
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY (PRECONDITIONS ARE MET): slot `len` was live and is no longer counted
        Some(unsafe { self.slots.slot(self.len).read() })
    }

    /// Destroys elements from the back until `len() == len`.
    pub fn truncate(&mut self, len: usize) {
        let (slots, current, alloc) = self.parts();
        truncate_in(slots, current, alloc, len);
    }

    /// Destroys every element. Keeps the block.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges contents and allocators with `other` in O(1).
    ///
    /// Allocators must propagate on swap or compare equal; only checked in
    /// debug builds.
    pub fn swap(&mut self, other: &mut Self) {
        debug_assert!(
            A::PROPAGATE_ON_SWAP || self.alloc == other.alloc,
            "swap() between unequal, non-propagating allocators"
        );

        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.alloc, &mut other.alloc);
    }

    /// Split borrow of the fields, so a buffer can borrow the allocator
    /// while the block and length are updated.
    #[inline(always)]
    pub(crate) fn parts(&mut self) -> (&mut RawSlots<T>, &mut usize, &A) {
        (&mut self.slots, &mut self.len, &self.alloc)
    }

    /// `len() + additional`, or `CapacityOverflow`.
    pub(crate) fn required(&self, additional: usize) -> Result<usize, VectorError> {
        self.len
            .checked_add(additional)
            .ok_or(VectorError::CapacityOverflow {
                requested: usize::MAX,
                max: self.max_size(),
            })
    }

    #[inline]
    pub(crate) fn recommend(&self, new_size: usize) -> Result<usize, VectorError> {
        recommend(self.capacity(), self.max_size(), new_size)
    }

    #[cold]
    #[inline(never)]
    fn reallocate_exact(&mut self, capacity: usize) -> Result<(), VectorError> {
        let (slots, len, alloc) = self.parts();
        let mut buffer = ReallocationBuffer::with_capacity(alloc, capacity)?;

        // SAFETY (PRECONDITIONS ARE MET): same allocator, empty window at 0 with room for every element
        unsafe { buffer.swap_in(slots, len) };

        Ok(())
    }

    /// Grows to the recommended capacity for `len() + count` elements,
    /// letting `fill` build exactly `count` new elements at `index` first.
    ///
    /// Nothing in the vector changes until `fill` succeeded.
    #[cold]
    #[inline(never)]
    pub(crate) fn reallocate_around<F>(&mut self, index: usize, count: usize, fill: F) -> Result<(), VectorError>
    where
        F: FnOnce(&mut ReallocationBuffer<'_, T, A>),
    {
        let capacity = self.recommend(self.required(count)?)?;
        let (slots, len, alloc) = self.parts();

        let mut buffer = ReallocationBuffer::with_capacity(alloc, capacity)?;
        buffer.open_at(index);
        fill(&mut buffer);
        debug_assert_eq!(buffer.len(), count);

        // SAFETY (PRECONDITIONS ARE MET): window sits at `index <= len` with room for the rest
        unsafe { buffer.swap_in(slots, len) };

        Ok(())
    }

    /// Replaces every element with the ones `fill` builds into a fresh block
    /// of `capacity` slots.
    ///
    /// The old elements are destroyed only after `fill` succeeded.
    #[cold]
    #[inline(never)]
    pub(crate) fn replace_storage<F>(&mut self, capacity: usize, fill: F) -> Result<(), VectorError>
    where
        F: FnOnce(&mut ReallocationBuffer<'_, T, A>),
    {
        let (slots, len, alloc) = self.parts();

        let mut buffer = ReallocationBuffer::with_capacity(alloc, capacity)?;
        fill(&mut buffer);
        truncate_in(slots, len, alloc, 0);

        // SAFETY (PRECONDITIONS ARE MET): vector is empty, window starts at 0
        unsafe { buffer.swap_in(slots, len) };

        Ok(())
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        let (slots, len, alloc) = self.parts();
        let count = mem::take(len);
        // SAFETY (PRECONDITIONS ARE MET): slot 0 is always addressable
        let first = unsafe { slots.slot(0) };

        // Not completed: the block goes back even if a destructor panics.
        let _release = ExceptionGuard::new(|| {
            // SAFETY (PRECONDITIONS ARE MET): the block came from `alloc`; every element is destroyed by now
            unsafe { slots.release(alloc) };
        });

        // SAFETY (PRECONDITIONS ARE MET): [0, count) was live and is no longer counted
        unsafe { destroy_range(alloc, first, count) };
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U, A, B> PartialEq<Vector<U, B>> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Vector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for Vector<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Vector<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vector<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for Vector<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
