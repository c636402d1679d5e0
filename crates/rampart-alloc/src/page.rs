// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PageAllocator - anonymous memory mappings as an allocator.
//!
//! Every block is its own private mapping, rounded up to whole pages. Useful for
//! large buffers that should go straight back to the OS when released.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::traits::Allocator;

/// Allocator backed by `mmap`/`munmap`.
///
/// Alignments larger than the page size are refused. All instances compare equal:
/// any mapping can be released by any instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageAllocator {
    page_size: usize,
}

impl PageAllocator {
    /// Creates a page allocator using the system page size.
    pub fn new() -> Self {
        // SAFETY: `sysconf` only reads a system constant.
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

        Self {
            // sysconf only fails for unknown names; 4 KiB is the floor on every Unix we target.
            page_size: if page_size > 0 { page_size as usize } else { 4096 },
        }
    }

    /// Returns the page size used for rounding.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of bytes actually mapped for `layout`.
    ///
    /// Returns `None` if rounding overflows.
    pub fn mapped_len(&self, layout: Layout) -> Option<usize> {
        let pages = layout.size().checked_add(self.page_size - 1)? / self.page_size;
        pages.checked_mul(self.page_size)
    }
}

impl Default for PageAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl Allocator for PageAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.align() > self.page_size {
            log::debug!(
                "PageAllocator: alignment {} exceeds page size {}",
                layout.align(),
                self.page_size
            );
            return Err(AllocError);
        }

        let len = self.mapped_len(layout).ok_or(AllocError)?;

        // SAFETY: an anonymous private mapping at a kernel-chosen address touches no
        // existing memory.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            log::debug!("PageAllocator: mmap of {len} bytes failed");
            return Err(AllocError);
        }

        log::trace!("PageAllocator: mapped {len} bytes at {ptr:p}");

        NonNull::new(ptr as *mut u8).ok_or(AllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // A layout that was mapped successfully cannot overflow here.
        let Some(len) = self.mapped_len(layout) else {
            return;
        };

        // SAFETY: `ptr` was mapped by `allocate` with this same length.
        let failed = unsafe { libc::munmap(ptr.as_ptr() as *mut libc::c_void, len) } != 0;

        debug_assert!(!failed, "PageAllocator::deallocate: munmap failed");
        log::trace!("PageAllocator: unmapped {len} bytes at {:p}", ptr.as_ptr());
    }
}
