// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_alloc::TrackingAllocator;
use rampart_test_utils::DropCounter;

use crate::{RampartVec, VecError};

fn one_to_five() -> RampartVec<i32> {
    RampartVec::from_slice(&[1, 2, 3, 4, 5]).expect("Failed to from_slice(..)")
}

// =============================================================================
// insert()
// =============================================================================

#[test]
fn test_insert_middle_reallocating() {
    let mut vec = one_to_five();
    assert_eq!(vec.capacity(), 5);

    vec.insert(2, 99).expect("Failed to insert(..)");

    assert_eq!(vec, [1, 2, 99, 3, 4, 5]);
    assert_eq!(vec.len(), 6);
    assert_eq!(vec.capacity(), 10);
}

#[test]
fn test_insert_middle_in_place_keeps_prefix_addresses() {
    let mut vec: RampartVec<i32> = RampartVec::with_capacity(8).expect("Failed to with_capacity(..)");
    vec.extend_from_slice(&[1, 2, 3, 4, 5]).expect("Failed to extend_from_slice(..)");
    let first = &vec[0] as *const i32;
    let second = &vec[1] as *const i32;

    vec.insert(2, 99).expect("Failed to insert(..)");

    assert_eq!(vec, [1, 2, 99, 3, 4, 5]);
    assert_eq!(&vec[0] as *const i32, first);
    assert_eq!(&vec[1] as *const i32, second);
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_insert_at_ends() {
    let mut vec = one_to_five();

    vec.insert(0, 0).expect("Failed to insert(..)");
    vec.insert(6, 6).expect("Failed to insert(..)");

    assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_insert_past_end_is_out_of_range() {
    let alloc = TrackingAllocator::new();
    let mut vec = RampartVec::from_slice_in(&[1u8], alloc.clone()).expect("Failed to from_slice_in(..)");

    let result = vec.insert(2, 7);

    assert_eq!(result, Err(VecError::OutOfRange { index: 2, len: 1 }));
    assert_eq!(vec, [1]);
    assert_eq!(alloc.allocations(), 1);
}

#[test]
fn test_insert_then_erase_round_trip() {
    let mut vec = one_to_five();

    vec.insert(2, 99).expect("Failed to insert(..)");
    assert_eq!(vec.erase(2).expect("Failed to erase(..)"), 99);

    assert_eq!(vec, [1, 2, 3, 4, 5]);
}

// =============================================================================
// insert_n(), insert_slice(), insert_iter()
// =============================================================================

#[test]
fn test_insert_n_larger_than_doubling_allocates_exactly() {
    let mut vec: RampartVec<u8> = RampartVec::from_slice(&[1, 2]).expect("Failed to from_slice(..)");

    vec.insert_n(1, 10, &0).expect("Failed to insert_n(..)");

    assert_eq!(vec.len(), 12);
    assert_eq!(vec.capacity(), 12);
    assert_eq!(vec[0], 1);
    assert_eq!(vec[11], 2);
    assert!(vec[1..11].iter().all(|x| *x == 0));
}

#[test]
fn test_insert_n_zero_never_allocates() {
    let alloc = TrackingAllocator::new();
    let mut vec: RampartVec<u32, _> = RampartVec::new_in(alloc.clone());

    vec.insert_n(0, 0, &1).expect("Failed to insert_n(..)");
    vec.insert_slice(0, &[]).expect("Failed to insert_slice(..)");
    vec.resize(0, 3).expect("Failed to resize(..)");

    assert_eq!(vec.capacity(), 0);
    assert_eq!(alloc.allocations(), 0);
}

#[test]
fn test_insert_slice_in_place() {
    let mut vec: RampartVec<char> = RampartVec::with_capacity(10).expect("Failed to with_capacity(..)");
    vec.extend_from_slice(&['a', 'e']).expect("Failed to extend_from_slice(..)");

    vec.insert_slice(1, &['b', 'c', 'd']).expect("Failed to insert_slice(..)");

    assert_eq!(vec, ['a', 'b', 'c', 'd', 'e']);
    assert_eq!(vec.capacity(), 10);
}

#[test]
fn test_insert_iter_preserves_order() {
    let mut vec = one_to_five();

    vec.insert_iter(3, [10, 20, 30].into_iter()).expect("Failed to insert_iter(..)");

    assert_eq!(vec, [1, 2, 3, 10, 20, 30, 4, 5]);
}

#[test]
fn test_insert_iter_out_of_range_does_not_consume() {
    let mut vec = one_to_five();
    let mut consumed = 0;

    let result = vec.insert_iter(9, (0..3).inspect(|_| consumed += 1));

    assert!(matches!(result, Err(VecError::OutOfRange { index: 9, len: 5 })));
    assert_eq!(consumed, 0);
}

#[test]
fn test_insert_iter_staging_buffer_is_released() {
    let alloc = TrackingAllocator::new();
    let mut vec = RampartVec::from_slice_in(&[1u32, 5], alloc.clone()).expect("Failed to from_slice_in(..)");

    vec.insert_iter(1, 2..5).expect("Failed to insert_iter(..)");

    assert_eq!(vec, [1, 2, 3, 4, 5]);
    assert_eq!(alloc.live_blocks(), 1);
}

// =============================================================================
// emplace(), emplace_back(), try_push_with()
// =============================================================================

#[test]
fn test_emplace_constructs_in_position() {
    let mut vec = one_to_five();

    vec.emplace(1, || 42).expect("Failed to emplace(..)");
    vec.emplace_back(|| 6).expect("Failed to emplace_back(..)");

    assert_eq!(vec, [1, 42, 2, 3, 4, 5, 6]);
}

#[test]
fn test_try_push_with_error_keeps_buffer() {
    let mut vec = one_to_five();
    let ptr = vec.as_ptr();

    let result: Result<(), VecError> = vec.try_push_with(|| Err(VecError::CapacityOverflow));

    assert_eq!(result, Err(VecError::CapacityOverflow));
    assert_eq!(vec, [1, 2, 3, 4, 5]);
    assert_eq!(vec.capacity(), 5);
    assert_eq!(vec.as_ptr(), ptr);
}

// =============================================================================
// append(), extend_from_slice()
// =============================================================================

#[test]
fn test_append_from_other_allocator() {
    let counter = DropCounter::new();
    let alloc = TrackingAllocator::new();
    let mut left = RampartVec::new();
    let mut right = RampartVec::new_in(alloc.clone());

    left.push(counter.track(1)).expect("Failed to push(..)");
    right.push(counter.track(2)).expect("Failed to push(..)");
    right.push(counter.track(3)).expect("Failed to push(..)");

    left.append(&mut right).expect("Failed to append(..)");

    assert_eq!(left.iter().map(|t| t.value).collect::<Vec<_>>(), [1, 2, 3]);
    assert!(right.is_empty());
    assert_eq!(right.capacity(), 2);
    assert_eq!(counter.created(), 3);
    assert_eq!(counter.dropped(), 0);
}

#[test]
fn test_extend_from_slice_clones() {
    let mut vec = RampartVec::from_slice(&[String::from("a")]).expect("Failed to from_slice(..)");
    let extra = [String::from("b"), String::from("c")];

    vec.extend_from_slice(&extra).expect("Failed to extend_from_slice(..)");

    assert_eq!(vec, ["a", "b", "c"]);
    assert_eq!(extra, ["b", "c"]);
}

// =============================================================================
// resize(), resize_with(), try_resize_with()
// =============================================================================

#[test]
fn test_resize_grow_and_shrink() {
    let counter = DropCounter::new();
    let mut vec = RampartVec::new();

    vec.resize(4, counter.track(7)).expect("Failed to resize(..)");
    assert_eq!(vec.len(), 4);
    assert_eq!(counter.live(), 4);

    vec.resize(1, counter.track(8)).expect("Failed to resize(..)");
    assert_eq!(vec.len(), 1);
    assert_eq!(vec.capacity(), 4);
    assert_eq!(counter.live(), 1);
}

#[test]
fn test_resize_with_counter() {
    let mut vec: RampartVec<u32> = RampartVec::new();
    let mut next = 0;

    vec.resize_with(4, || {
        next += 1;
        next
    })
    .expect("Failed to resize_with(..)");

    assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn test_try_resize_with_partial_failure_is_rolled_back() {
    let counter = DropCounter::new();
    let mut vec = RampartVec::with_capacity(16).expect("Failed to with_capacity(..)");
    vec.push(counter.track(0)).expect("Failed to push(..)");
    let mut made = 0;

    let result = vec.try_resize_with(8, || {
        made += 1;
        if made == 5 {
            return Err(VecError::CapacityOverflow);
        }
        Ok(counter.track(made))
    });

    assert_eq!(result, Err(VecError::CapacityOverflow));
    assert_eq!(vec.len(), 1);
    assert_eq!(counter.live(), 1);
}

#[test]
fn test_resize_default() {
    let mut vec: RampartVec<Option<u8>> = RampartVec::new();

    vec.resize_default(2).expect("Failed to resize_default(..)");

    assert_eq!(vec, [None, None]);
}
