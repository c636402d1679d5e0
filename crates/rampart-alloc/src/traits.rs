// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// A source of raw memory blocks.
///
/// Equality is part of the contract: `a == b` means a block allocated by `a` may be
/// deallocated by `b`. Containers rely on this to decide whether two buffers can be
/// exchanged by swapping pointers.
///
/// # Safety
///
/// Implementors must guarantee that:
///
/// - A block returned by [`allocate`](Allocator::allocate) is valid for reads and writes of
///   `layout.size()` bytes, aligned to `layout.align()`, and stays valid until it is passed
///   to [`deallocate`](Allocator::deallocate) on this allocator or one equal to it.
/// - Equality is consistent with the rule above.
pub unsafe trait Allocator: PartialEq {
    /// Allocates a block fitting `layout`.
    ///
    /// Callers never pass a zero-sized layout; containers represent "no buffer" without
    /// calling the allocator.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the request cannot be satisfied. The allocator keeps no
    /// partial state on failure.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator (or one equal to it)
    /// with exactly `layout`, and must not have been released already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A> Allocator for &A
where
    A: Allocator,
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
