// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RawStorage - buffer ownership and capacity bookkeeping.
//!
//! Owns the three cursors of a growable array: the data start (`ptr`), the logical end
//! (`len`) and the capacity end (`cap`). Knows sizes and alignments, never element
//! semantics: it does not construct or drop elements, it only hands out and takes back
//! raw slots.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use rampart_alloc::Allocator;

use crate::error::VecError;

/// Next capacity for a buffer that must grow past `current`.
///
/// Doubling keeps the total transfer work of `n` single-element appends at `O(n)`.
#[inline]
pub(crate) const fn grow_capacity(current: usize) -> usize {
    if current > 0 {
        current.saturating_mul(2)
    } else {
        1
    }
}

#[inline(always)]
pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

pub(crate) struct RawStorage<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the storage uniquely owns its buffer and the elements in it. Every owner
// built on top of it (vector, owning iterator) inherits these bounds.
unsafe impl<T: Send, A: Allocator + Send> Send for RawStorage<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawStorage<T, A> {}

impl<T, A: Allocator> RawStorage<T, A> {
    /// Storage with no buffer. Makes no allocator call.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, VecError> {
        let ptr = Self::allocate(&alloc, capacity)?;

        Ok(Self {
            ptr,
            cap: if is_zst::<T>() { 0 } else { capacity },
            len: 0,
            alloc,
            _marker: PhantomData,
        })
    }

    pub(crate) fn layout_for(n: usize) -> Result<Layout, VecError> {
        Layout::array::<T>(n).map_err(|_| VecError::CapacityOverflow)
    }

    /// Allocates raw slots for `n` elements.
    ///
    /// `n == 0` and zero-sized `T` make no allocator call and return the dangling marker.
    pub(crate) fn allocate(alloc: &A, n: usize) -> Result<NonNull<T>, VecError> {
        if n == 0 || is_zst::<T>() {
            return Ok(NonNull::dangling());
        }

        let layout = Self::layout_for(n)?;

        match alloc.allocate(layout) {
            Ok(ptr) => {
                log::trace!("RawStorage: allocated {n} slots ({} bytes)", layout.size());
                Ok(ptr.cast())
            }
            Err(_) => {
                log::debug!(
                    "RawStorage: allocator refused {n} slots ({} bytes)",
                    layout.size()
                );
                Err(VecError::alloc_failed(layout))
            }
        }
    }

    /// Releases raw slots. Never drops elements.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`allocate`](Self::allocate) on `alloc` (or an equal allocator)
    /// with the same `n`, and must not be used afterwards.
    pub(crate) unsafe fn free(alloc: &A, ptr: NonNull<T>, n: usize) {
        if n == 0 || is_zst::<T>() {
            return;
        }

        let Ok(layout) = Self::layout_for(n) else {
            // The block was allocated with this very layout.
            return;
        };

        // SAFETY: forwarded contract.
        unsafe { alloc.deallocate(ptr.cast(), layout) };
        log::trace!("RawStorage: released {n} slots");
    }

    /// Replaces the buffer with `ptr`/`cap` holding `len` live elements.
    ///
    /// The old buffer is released without dropping anything: its elements must already be
    /// transferred or destroyed.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate(self.allocator(), cap)` and hold `len` live elements.
    pub(crate) unsafe fn install(&mut self, ptr: NonNull<T>, cap: usize, len: usize) {
        let old_ptr = mem::replace(&mut self.ptr, ptr);
        let old_cap = mem::replace(&mut self.cap, if is_zst::<T>() { 0 } else { cap });
        self.len = len;

        // SAFETY: the old block was allocated by our allocator with `old_cap` slots.
        unsafe { Self::free(&self.alloc, old_ptr, old_cap) };

        self.assert_invariants();
    }

    /// Exchanges buffers and lengths; allocators stay in place.
    pub(crate) fn swap_buffers(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
        mem::swap(&mut self.len, &mut other.len);
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        if is_zst::<T>() { usize::MAX } else { self.cap }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    ///
    /// `[0, len)` must be live and `len <= capacity()`.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity(), "RawStorage::set_len: len > capacity");
        self.len = len;
    }

    #[inline]
    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    pub(crate) fn assert_invariants(&self) {
        debug_assert!(
            self.len <= self.capacity(),
            "RawStorage: logical end {} beyond capacity end {}",
            self.len,
            self.capacity()
        );
        debug_assert!(
            self.cap != 0 || self.ptr == NonNull::dangling(),
            "RawStorage: zero capacity must not own a buffer"
        );
    }
}

impl<T, A: Allocator> Drop for RawStorage<T, A> {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`cap` always describe the block we own (or the dangling marker).
        unsafe { Self::free(&self.alloc, self.ptr, self.cap) };
    }
}
