// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::traits::Allocator;

/// The process-wide global allocator.
///
/// Stateless; every instance compares equal to every other, so buffers owned by
/// `Global`-backed containers can always be exchanged by pointer swap.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Global;

unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "Global::allocate: zero-sized layout");

        // SAFETY: the layout has a non-zero size (container contract).
        let ptr = unsafe { alloc::alloc::alloc(layout) };

        NonNull::new(ptr).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees `ptr` came from `allocate` with this layout.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
