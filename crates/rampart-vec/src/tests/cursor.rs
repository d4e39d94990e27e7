// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_test_utils::catch_panic;

use crate::Vector;

fn numbers(n: i32) -> Vector<i32> {
    Vector::from_iter_in(1..=n, rampart_alloc::Global).expect("Failed to from_iter_in(..)")
}

// =============================================================================
// arithmetic
// =============================================================================

#[test]
fn test_begin_plus_len_is_end() {
    let vector = numbers(7);

    assert!(vector.begin() + 7 == vector.end());
    assert_eq!(vector.end() - vector.begin(), 7);
    assert_eq!(vector.begin() - vector.end(), -7);
}

#[test]
fn test_end_minus_one_is_last() {
    let vector = numbers(5);

    assert_eq!(*(vector.end() - 1), 5);
}

#[test]
fn test_compound_assignment() {
    let vector = numbers(10);
    let mut cursor = vector.begin();

    cursor += 6;
    assert_eq!(cursor.index(), 6);
    assert_eq!(*cursor, 7);

    cursor -= 4;
    assert_eq!(cursor.index(), 2);
    assert_eq!(*cursor, 3);
}

#[test]
fn test_relative_indexing() {
    let vector = numbers(6);
    let cursor = vector.cursor_at(2);

    assert_eq!(cursor[0], 3);
    assert_eq!(cursor[3], 6);
}

#[test]
fn test_past_end_panics() {
    let vector = numbers(3);

    assert!(catch_panic(|| vector.end() + 1).is_none());
    assert!(catch_panic(|| vector.begin() - 1).is_none());
    assert!(catch_panic(|| vector.cursor_at(4)).is_none());
}

#[test]
fn test_signed_offset() {
    let vector = numbers(6);
    let cursor = vector.cursor_at(4);

    assert_eq!(cursor.offset(-2).index(), 2);
    assert_eq!(cursor.offset(2).index(), 6);
    assert_eq!(cursor.offset(0), cursor);

    let distance = vector.begin() - cursor;
    assert_eq!(cursor.offset(distance), vector.begin());
}

#[test]
fn test_signed_offset_out_of_range_panics() {
    let vector = numbers(3);
    let cursor = vector.cursor_at(1);

    assert!(catch_panic(|| cursor.offset(-2)).is_none());
    assert!(catch_panic(|| cursor.offset(3)).is_none());
    assert!(catch_panic(|| cursor.offset(isize::MIN)).is_none());
}

#[test]
fn test_peek() {
    let vector = numbers(4);
    let cursor = vector.cursor_at(2);

    assert_eq!(cursor.peek(-2), Some(&vector[0]));
    assert_eq!(cursor.peek(1), Some(&vector[3]));
    assert_eq!(cursor.peek(-3), None);
    assert_eq!(cursor.peek(2), None);
}

#[test]
fn test_deref_end_panics() {
    let vector = numbers(3);
    let end = vector.end();

    assert!(catch_panic(|| *end).is_none());
    assert_eq!(end.get(), None);
}

// =============================================================================
// comparisons
// =============================================================================

#[test]
fn test_ordering() {
    let vector = numbers(4);
    let first = vector.begin();
    let second = vector.begin() + 1;

    assert!(first < second);
    assert!(second > first);
    assert!(first <= first);
    assert!(second >= first);
    assert!(first != second);
    assert_eq!(Ord::max(first, second).index(), 1);
}

// =============================================================================
// iteration
// =============================================================================

#[test]
fn test_iterates_to_end() {
    let vector = numbers(5);
    let cursor = vector.cursor_at(2);

    assert_eq!(cursor.len(), 3);
    assert_eq!(cursor.copied().collect::<Vec<_>>(), [3, 4, 5]);
}

#[test]
fn test_double_ended() {
    let vector = numbers(5);
    let mut cursor = vector.cursor_at(1);

    assert_eq!(cursor.next_back(), Some(&5));
    assert_eq!(cursor.next(), Some(&2));
    assert_eq!(cursor.len(), 2);
    assert_eq!(cursor.rev().copied().collect::<Vec<_>>(), [4, 3]);
}

#[test]
fn test_empty_vector_cursors() {
    let vector: Vector<i32> = Vector::new();

    assert!(vector.begin() == vector.end());
    assert_eq!(vector.begin().next(), None);
}
