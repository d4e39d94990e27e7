// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Deref, Index, Sub, SubAssign};

/// Random-access position into a vector's live elements.
///
/// A cursor borrows the vector, so no mutation can invalidate it while it
/// exists. Positions range over `[0, len]`; `len` is the end position and
/// cannot be dereferenced.
///
/// A cursor is also an iterator over `[index(), len)`. Iterating from the
/// back shrinks that range without moving the cursor.
///
/// `+`, `-`, `+=`, `-=` and `[]` take `usize` offsets; moving backward goes
/// through `-` and `-=`. Signed distances, such as the result of
/// `cursor - cursor`, are applied with [`Cursor::offset`] and
/// [`Cursor::peek`].
///
/// # Example
///
/// ```rust
/// use rampart_vec::Vector;
///
/// let vector = Vector::from_slice(&[10, 20, 30]).unwrap();
///
/// let begin = vector.begin();
/// let end = vector.end();
///
/// assert_eq!(end - begin, 3);
/// assert_eq!(*(end - 1), 30);
/// assert_eq!(begin[1], 20);
/// assert_eq!((begin + 1).copied().collect::<Vec<_>>(), [20, 30]);
/// ```
pub struct Cursor<'a, T> {
    elements: &'a [T],
    position: usize,
    back: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(elements: &'a [T], position: usize) -> Self {
        assert!(
            position <= elements.len(),
            "cursor position (is {position}) should be <= len (is {})",
            elements.len()
        );

        Self {
            elements,
            position,
            back: elements.len(),
        }
    }

    /// Position of the cursor.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.position
    }

    /// Element under the cursor, `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.elements.get(self.position)
    }

    /// Cursor moved by a signed `delta`.
    ///
    /// # Panics
    ///
    /// If the new position falls outside `[0, len]`.
    pub fn offset(self, delta: isize) -> Self {
        let magnitude = delta.unsigned_abs();

        if delta < 0 { self - magnitude } else { self + magnitude }
    }

    /// Element at signed `delta` from the cursor, `None` outside the live
    /// range.
    pub fn peek(&self, delta: isize) -> Option<&'a T> {
        let position = self.position.checked_add_signed(delta)?;
        self.elements.get(position)
    }

    fn same_range(&self, other: &Self) -> bool {
        core::ptr::eq(self.elements, other.elements)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.elements.len())
            .finish()
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.elements[self.position]
    }
}

impl<T> Index<usize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, offset: usize) -> &T {
        &self.elements[self.position + offset]
    }
}

impl<T> AddAssign<usize> for Cursor<'_, T> {
    fn add_assign(&mut self, offset: usize) {
        let remaining = self.elements.len() - self.position;
        assert!(offset <= remaining, "cursor moved past the end");

        self.position += offset;
    }
}

impl<T> SubAssign<usize> for Cursor<'_, T> {
    fn sub_assign(&mut self, offset: usize) {
        assert!(offset <= self.position, "cursor moved before the beginning");

        self.position -= offset;
    }
}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, offset: usize) -> Self {
        self += offset;
        self
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, offset: usize) -> Self {
        self -= offset;
        self
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    /// Signed distance between two cursors of the same vector.
    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_range(&other), "cursors of different vectors");

        self.position as isize - other.position as isize
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(self.same_range(other), "cursors of different vectors");

        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(self.same_range(other), "cursors of different vectors");

        self.position.cmp(&other.position)
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.position >= self.back {
            return None;
        }

        let item = &self.elements[self.position];
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Cursor<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back <= self.position {
            return None;
        }

        self.back -= 1;
        Some(&self.elements[self.back])
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> core::iter::FusedIterator for Cursor<'_, T> {}
