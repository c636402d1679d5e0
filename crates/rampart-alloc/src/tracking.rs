// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! TrackingAllocator - a counting, failure-injecting test double.

use alloc::rc::Rc;
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::global::Global;
use crate::traits::Allocator;

/// Failure injection for [`TrackingAllocator`].
///
/// The behaviour is sticky: once set it stays active until changed, except
/// `FailNext` which resets itself after firing.
///
/// # Example
///
/// ```rust
/// use core::alloc::Layout;
/// use rampart_alloc::{Allocator, AllocatorBehaviour, TrackingAllocator};
///
/// let alloc = TrackingAllocator::new();
/// alloc.change_behaviour(AllocatorBehaviour::FailNext);
///
/// let layout = Layout::new::<u64>();
/// assert!(alloc.allocate(layout).is_err());
///
/// // FailNext fired once; the next request goes through.
/// let ptr = alloc.allocate(layout).unwrap();
/// unsafe { alloc.deallocate(ptr, layout) };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocatorBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// The next `allocate()` call fails, then behaviour resets to `None`.
    FailNext,
    /// Allow this many more successful allocations, then fail every request.
    FailAfter(usize),
    /// Every `allocate()` call fails.
    FailAlways,
}

#[derive(Debug, Default)]
struct TrackingState {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    failures: Cell<usize>,
    live_bytes: Cell<usize>,
    total_bytes: Cell<usize>,
    behaviour: Cell<AllocatorBehaviour>,
}

/// Allocator that forwards to [`Global`] while counting every request.
///
/// Clones share their counters and compare equal. Two allocators created with
/// [`TrackingAllocator::new`] are independent and compare unequal, which makes this
/// type the natural way to exercise "foreign allocator" code paths.
///
/// Single-threaded by construction (`Rc` + `Cell`).
#[derive(Debug, Clone, Default)]
pub struct TrackingAllocator {
    state: Rc<TrackingState>,
}

impl TrackingAllocator {
    /// Creates a fresh allocator with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the failure injection behaviour.
    pub fn change_behaviour(&self, behaviour: AllocatorBehaviour) {
        self.state.behaviour.set(behaviour);
    }

    /// Returns the current failure injection behaviour.
    pub fn behaviour(&self) -> AllocatorBehaviour {
        self.state.behaviour.get()
    }

    /// Number of successful allocations.
    pub fn allocations(&self) -> usize {
        self.state.allocations.get()
    }

    /// Number of deallocations.
    pub fn deallocations(&self) -> usize {
        self.state.deallocations.get()
    }

    /// Number of refused allocations.
    pub fn failures(&self) -> usize {
        self.state.failures.get()
    }

    /// Number of blocks currently allocated.
    pub fn live_blocks(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Bytes currently allocated.
    pub fn live_bytes(&self) -> usize {
        self.state.live_bytes.get()
    }

    /// Bytes handed out over the allocator's lifetime.
    pub fn total_bytes(&self) -> usize {
        self.state.total_bytes.get()
    }

    fn should_fail(&self) -> bool {
        match self.state.behaviour.get() {
            AllocatorBehaviour::None => false,
            AllocatorBehaviour::FailNext => {
                self.state.behaviour.set(AllocatorBehaviour::None);
                true
            }
            AllocatorBehaviour::FailAfter(0) => true,
            AllocatorBehaviour::FailAfter(remaining) => {
                self.state
                    .behaviour
                    .set(AllocatorBehaviour::FailAfter(remaining - 1));
                false
            }
            AllocatorBehaviour::FailAlways => true,
        }
    }
}

impl PartialEq for TrackingAllocator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for TrackingAllocator {}

unsafe impl Allocator for TrackingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if self.should_fail() {
            self.state.failures.set(self.state.failures.get() + 1);
            return Err(AllocError);
        }

        let ptr = Global.allocate(layout)?;

        let state = &self.state;
        state.allocations.set(state.allocations.get() + 1);
        state.live_bytes.set(state.live_bytes.get() + layout.size());
        state.total_bytes.set(state.total_bytes.get() + layout.size());

        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let state = &self.state;
        debug_assert!(
            state.live_bytes.get() >= layout.size(),
            "TrackingAllocator::deallocate: more bytes released than allocated"
        );

        state.deallocations.set(state.deallocations.get() + 1);
        state.live_bytes.set(state.live_bytes.get() - layout.size());

        // SAFETY: every block handed out by this allocator came from `Global`.
        unsafe { Global.deallocate(ptr, layout) }
    }
}
