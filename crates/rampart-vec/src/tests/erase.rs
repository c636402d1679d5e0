// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ops::Bound;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rampart_test_utils::{DropCounter, PanicOnDrop, apply_permutation, index_permutations};

use crate::{RampartVec, VecError, erase, erase_if};

// =============================================================================
// erase()
// =============================================================================

#[test]
fn test_erase_shifts_tail() {
    let mut vec = RampartVec::from_slice(&[1, 2, 99, 3, 4, 5]).expect("Failed to from_slice(..)");
    let capacity = vec.capacity();

    assert_eq!(vec.erase(2), Ok(99));

    assert_eq!(vec, [1, 2, 3, 4, 5]);
    assert_eq!(vec.capacity(), capacity);
}

#[test]
fn test_erase_out_of_range() {
    let mut vec = RampartVec::from_slice(&[1, 2]).expect("Failed to from_slice(..)");

    assert_eq!(vec.erase(2), Err(VecError::OutOfRange { index: 2, len: 2 }));
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_erase_every_position_drops_once() {
    for pos in 0..5 {
        let counter = DropCounter::new();
        let mut vec = RampartVec::new();
        for i in 0..5 {
            vec.push(counter.track(i)).expect("Failed to push(..)");
        }

        let removed = vec.erase(pos).expect("Failed to erase(..)");
        assert_eq!(removed.value, pos);
        drop(removed);

        let expected: Vec<usize> = (0..5).filter(|i| *i != pos).collect();
        assert_eq!(vec.iter().map(|t| t.value).collect::<Vec<_>>(), expected);
        assert_eq!(counter.dropped(), 1);
    }
}

// =============================================================================
// erase_unordered()
// =============================================================================

#[test]
fn test_erase_unordered_moves_last_into_gap() {
    let mut vec = RampartVec::from_slice(&[10, 20, 30, 40]).expect("Failed to from_slice(..)");

    assert_eq!(vec.erase_unordered(1), Ok(20));

    assert_eq!(vec, [10, 40, 30]);
    assert_eq!(vec.len(), 3);
}

#[test]
fn test_erase_unordered_last_position() {
    let mut vec = RampartVec::from_slice(&[10, 20]).expect("Failed to from_slice(..)");

    assert_eq!(vec.erase_unordered(1), Ok(20));
    assert_eq!(vec.erase_unordered(0), Ok(10));
    assert!(vec.is_empty());
    assert!(vec.erase_unordered(0).is_err());
}

// =============================================================================
// erase_range()
// =============================================================================

#[test]
fn test_erase_range_variants() {
    let base = [0, 1, 2, 3, 4, 5];

    let mut vec = RampartVec::from_slice(&base).expect("Failed to from_slice(..)");
    vec.erase_range(1..3).expect("Failed to erase_range(..)");
    assert_eq!(vec, [0, 3, 4, 5]);

    let mut vec = RampartVec::from_slice(&base).expect("Failed to from_slice(..)");
    vec.erase_range(..=2).expect("Failed to erase_range(..)");
    assert_eq!(vec, [3, 4, 5]);

    let mut vec = RampartVec::from_slice(&base).expect("Failed to from_slice(..)");
    vec.erase_range(4..).expect("Failed to erase_range(..)");
    assert_eq!(vec, [0, 1, 2, 3]);

    let mut vec = RampartVec::from_slice(&base).expect("Failed to from_slice(..)");
    vec.erase_range(2..2).expect("Failed to erase_range(..)");
    assert_eq!(vec, base);
}

#[test]
fn test_erase_range_invalid() {
    let mut vec = RampartVec::from_slice(&[0, 1, 2]).expect("Failed to from_slice(..)");

    assert_eq!(
        vec.erase_range(1..4),
        Err(VecError::OutOfRange { index: 4, len: 3 })
    );
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = vec.erase_range(2..1);
    assert_eq!(inverted, Err(VecError::OutOfRange { index: 2, len: 3 }));
    assert_eq!(vec, [0, 1, 2]);
}

#[test]
fn test_erase_range_unrepresentable_bounds() {
    let mut vec = RampartVec::from_slice(&[0, 1, 2]).expect("Failed to from_slice(..)");

    assert_eq!(
        vec.erase_range((Bound::Excluded(usize::MAX), Bound::Unbounded)),
        Err(VecError::OutOfRange { index: usize::MAX, len: 3 })
    );
    assert_eq!(
        vec.erase_range(0..=usize::MAX),
        Err(VecError::OutOfRange { index: usize::MAX, len: 3 })
    );
    assert_eq!(vec, [0, 1, 2]);
}

#[test]
fn test_erase_range_drop_counts() {
    let counter = DropCounter::new();
    let mut vec = RampartVec::new();
    for i in 0..8 {
        vec.push(counter.track(i)).expect("Failed to push(..)");
    }

    vec.erase_range(2..6).expect("Failed to erase_range(..)");

    assert_eq!(counter.dropped(), 4);
    assert_eq!(vec.iter().map(|t| t.value).collect::<Vec<_>>(), [0, 1, 6, 7]);
}

// =============================================================================
// pop(), truncate(), clear()
// =============================================================================

#[test]
fn test_pop() {
    let mut vec = RampartVec::from_slice(&[1, 2]).expect("Failed to from_slice(..)");

    assert_eq!(vec.pop(), Some(2));
    assert_eq!(vec.pop(), Some(1));
    assert_eq!(vec.pop(), None);
    assert_eq!(vec.capacity(), 2);
}

#[test]
fn test_truncate_and_clear_keep_capacity() {
    let counter = DropCounter::new();
    let mut vec = RampartVec::new();
    for i in 0..6 {
        vec.push(counter.track(i)).expect("Failed to push(..)");
    }

    vec.truncate(10);
    assert_eq!(vec.len(), 6);

    vec.truncate(4);
    assert_eq!(counter.live(), 4);

    vec.clear();
    assert_eq!(counter.live(), 0);
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 8);
}

// =============================================================================
// retain(), erase(), erase_if()
// =============================================================================

#[test]
fn test_retain_keeps_order() {
    let mut vec: RampartVec<u32> = (0..10).collect();

    let removed = vec.retain(|x| x % 3 == 0);

    assert_eq!(removed, 6);
    assert_eq!(vec, [0, 3, 6, 9]);
}

#[test]
fn test_retain_mut_edits_survivors() {
    let mut vec: RampartVec<u32> = (1..=5).collect();

    vec.retain_mut(|x| {
        *x *= 10;
        *x != 30
    });

    assert_eq!(vec, [10, 20, 40, 50]);
}

#[test]
fn test_retain_panic_keeps_unvisited_elements() {
    let counter = DropCounter::new();
    let mut vec = RampartVec::new();
    for i in 0..6 {
        vec.push(counter.track(i)).expect("Failed to push(..)");
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        vec.retain(|t| {
            assert!(t.value != 3, "predicate panic");
            t.value % 2 == 0
        })
    }));

    assert!(result.is_err());
    // 1 was removed; 0 and 2 kept; 3.. were never decided and stay.
    assert_eq!(vec.iter().map(|t| t.value).collect::<Vec<_>>(), [0, 2, 3, 4, 5]);
    assert_eq!(counter.live(), 5);
}

#[test]
fn test_free_erase_and_erase_if() {
    let mut vec = RampartVec::from_slice(&[1, 2, 1, 3, 1]).expect("Failed to from_slice(..)");

    assert_eq!(erase(&mut vec, &1), 3);
    assert_eq!(vec, [2, 3]);

    assert_eq!(erase_if(&mut vec, |x| *x > 2), 1);
    assert_eq!(vec, [2]);

    assert_eq!(erase(&mut vec, &9), 0);
}

#[test]
fn test_erase_if_every_arrangement() {
    // Exhaustively check that removal is independent of where the matches sit.
    index_permutations(6, |perm| {
        let mut items = [0, 1, 2, 3, 4, 5];
        apply_permutation(&mut items, perm);

        let mut vec = RampartVec::from_slice(&items).expect("Failed to from_slice(..)");
        let removed = erase_if(&mut vec, |x| x % 2 == 1);

        let expected: Vec<i32> = items.iter().copied().filter(|x| x % 2 == 0).collect();
        assert_eq!(removed, 3);
        assert_eq!(vec, expected, "perm {perm:?}");
    });
}

// =============================================================================
// Panicking destructors
// =============================================================================

fn with_panic_at(counter: &DropCounter, n: usize, armed: usize) -> RampartVec<PanicOnDrop> {
    let mut vec = RampartVec::with_capacity(n).expect("Failed to with_capacity(..)");
    for i in 0..n {
        vec.push(PanicOnDrop::new(counter.track(i), i == armed))
            .expect("Failed to push(..)");
    }
    vec
}

fn values(vec: &RampartVec<PanicOnDrop>) -> Vec<usize> {
    vec.iter().map(PanicOnDrop::value).collect()
}

#[test]
fn test_truncate_destructor_panic_drops_tail_once() {
    let counter = DropCounter::new();
    let mut vec = with_panic_at(&counter, 6, 2);

    let result = catch_unwind(AssertUnwindSafe(|| vec.truncate(1)));

    assert!(result.is_err());
    assert_eq!(vec.len(), 1);
    assert_eq!(values(&vec), [0]);
    // The panicking element and the ones after it are all destroyed.
    assert_eq!(counter.dropped(), 5);
    assert_eq!(counter.live(), 1);
}

#[test]
fn test_erase_range_destructor_panic_closes_hole() {
    let counter = DropCounter::new();
    let mut vec = with_panic_at(&counter, 6, 2);

    let result = catch_unwind(AssertUnwindSafe(|| vec.erase_range(1..4)));

    assert!(result.is_err());
    assert_eq!(values(&vec), [0, 4, 5]);
    assert_eq!(counter.dropped(), 3);
    assert_eq!(counter.live(), 3);
}

#[test]
fn test_retain_destructor_panic_keeps_unvisited_elements() {
    let counter = DropCounter::new();
    let mut vec = with_panic_at(&counter, 6, 3);

    let result = catch_unwind(AssertUnwindSafe(|| vec.retain(|item| item.value() % 2 == 0)));

    assert!(result.is_err());
    // 1 and 3 were removed; 4 and 5 were never visited and are shifted down.
    assert_eq!(values(&vec), [0, 2, 4, 5]);
    assert_eq!(counter.dropped(), 2);
    assert_eq!(counter.live(), 4);
}
