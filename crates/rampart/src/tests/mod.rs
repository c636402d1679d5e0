// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::alloc::{AllocatorBehaviour, TrackingAllocator};
use crate::prelude::*;

// =============================================================================
// prelude
// =============================================================================

#[test]
fn test_prelude_covers_common_use() {
    let mut vec: RampartVec<u8> = rampart_vec![5, 1, 5, 2];

    assert_eq!(erase(&mut vec, &5), 2);
    assert_eq!(erase_if(&mut vec, |x| *x > 1), 1);
    assert_eq!(vec, [1]);
    assert!(*vec.allocator() == Global);
}

// =============================================================================
// allocators through the facade
// =============================================================================

#[cfg(unix)]
#[test]
fn test_page_allocator_backed_growth() {
    use crate::alloc::PageAllocator;

    let alloc = PageAllocator::new();
    let mut vec = RampartVec::new_in(alloc);

    for i in 0..10_000u32 {
        vec.push(i).expect("Failed to push(..)");
    }
    vec.insert(5_000, 42).expect("Failed to insert(..)");

    assert_eq!(vec.len(), 10_001);
    assert_eq!(vec[5_000], 42);
    assert_eq!(vec[5_001], 5_000);

    vec.shrink_to_fit().expect("Failed to shrink_to_fit()");
    assert_eq!(vec.capacity(), vec.len());
}

#[test]
fn test_tracking_allocator_failure_through_facade() {
    let alloc = TrackingAllocator::new();
    let mut vec: RampartVec<u64, _> = RampartVec::with_capacity_in(2, alloc.clone())
        .expect("Failed to with_capacity_in(..)");
    vec.extend_from_slice(&[1, 2]).expect("Failed to extend_from_slice(..)");

    alloc.change_behaviour(AllocatorBehaviour::FailAlways);

    assert!(matches!(vec.push(3), Err(VecError::AllocFailed { .. })));
    assert_eq!(vec, [1, 2]);
    assert_eq!(alloc.live_blocks(), 1);
}
