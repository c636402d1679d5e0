// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Rollback guards for transactional construction.
//!
//! Every bulk construction writes into slots that are not yet part of the live range.
//! The guard that owns those slots undoes the partial work when dropped, which happens on
//! an early `?` return and on unwinding alike. Success paths disarm the guard with
//! `commit`.

use core::mem::ManuallyDrop;
use core::ptr::{self, NonNull};

use rampart_alloc::Allocator;

use crate::raw_storage::RawStorage;

/// Sequential writer over `limit` uninitialized slots.
///
/// Tracks how many slots hold live values; the owning guard destroys exactly those on
/// rollback.
pub(crate) struct SlotWriter<T> {
    dst: *mut T,
    written: usize,
    limit: usize,
}

impl<T> SlotWriter<T> {
    /// # Safety
    ///
    /// `dst..dst + limit` must be valid, uninitialized slots.
    unsafe fn new(dst: *mut T, limit: usize) -> Self {
        Self {
            dst,
            written: 0,
            limit,
        }
    }

    #[inline]
    pub(crate) fn write(&mut self, value: T) {
        assert!(
            self.written < self.limit,
            "SlotWriter::write: no slot left for value"
        );

        // SAFETY: `written < limit`, slot is in bounds and uninitialized.
        unsafe { self.dst.add(self.written).write(value) };
        self.written += 1;
    }

    /// Moves `count` values from `src` into the next slots.
    ///
    /// # Safety
    ///
    /// `src..src + count` must be live values that the caller gives up ownership of, and
    /// must not overlap the writer's slots.
    pub(crate) unsafe fn move_from(&mut self, src: *const T, count: usize) {
        assert!(
            count <= self.remaining(),
            "SlotWriter::move_from: not enough slots left"
        );

        // SAFETY: bounds checked above; caller guarantees `src` and non-overlap.
        unsafe { ptr::copy_nonoverlapping(src, self.dst.add(self.written), count) };
        self.written += count;
    }

    #[inline]
    pub(crate) fn written(&self) -> usize {
        self.written
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.limit - self.written
    }

    /// Destroys the values written so far.
    ///
    /// The count is reset first so a panicking destructor cannot cause a double drop.
    unsafe fn drop_written(&mut self) {
        let written = core::mem::take(&mut self.written);

        // SAFETY: the first `written` slots hold live values we own.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.dst, written)) };
    }
}

/// Guard over a freshly allocated buffer during reallocation.
///
/// Rollback destroys the values constructed into the gap and frees the new buffer. The
/// old buffer is never touched, so the container is exactly as it was.
pub(crate) struct RelocationGuard<'a, T, A: Allocator> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
    pub(crate) writer: SlotWriter<T>,
}

impl<'a, T, A: Allocator> RelocationGuard<'a, T, A> {
    /// # Safety
    ///
    /// `ptr` must come from `RawStorage::allocate(alloc, cap)` and `gap_start + gap_len`
    /// must not exceed `cap`.
    pub(crate) unsafe fn new(
        alloc: &'a A,
        ptr: NonNull<T>,
        cap: usize,
        gap_start: usize,
        gap_len: usize,
    ) -> Self {
        // SAFETY: the gap lies inside the new, still uninitialized buffer.
        let writer = unsafe { SlotWriter::new(ptr.as_ptr().add(gap_start), gap_len) };

        Self {
            alloc,
            ptr,
            cap,
            writer,
        }
    }

    /// Disarms the guard, handing back the new buffer.
    pub(crate) fn commit(self) -> (NonNull<T>, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.cap)
    }
}

impl<T, A: Allocator> Drop for RelocationGuard<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: the writer only drops slots it wrote; `ptr`/`cap` are exactly the block
        // handed to `new`, which the old buffer never references.
        unsafe {
            self.writer.drop_written();
            RawStorage::<T, A>::free(self.alloc, self.ptr, self.cap);
        }
    }
}

/// Guard over an in-place gap opened inside the live range.
///
/// Opening shifts `[pos, len)` toward the end by `gap` slots and temporarily shortens the
/// logical end to `pos`. Rollback destroys what was written into the gap and shifts the
/// tail back; commit extends the logical end over gap and tail.
pub(crate) struct GapGuard<'a, T, A: Allocator> {
    storage: &'a mut RawStorage<T, A>,
    pos: usize,
    gap: usize,
    tail: usize,
    pub(crate) writer: SlotWriter<T>,
}

impl<'a, T, A: Allocator> GapGuard<'a, T, A> {
    /// # Safety
    ///
    /// `pos <= len` and `len + gap <= capacity`.
    pub(crate) unsafe fn open(storage: &'a mut RawStorage<T, A>, pos: usize, gap: usize) -> Self {
        let len = storage.len();
        let tail = len - pos;
        let base = storage.ptr().as_ptr();

        debug_assert!(len + gap <= storage.capacity(), "GapGuard::open: gap exceeds capacity");

        // SAFETY: `pos + gap + tail = len + gap <= capacity`, so both ranges lie in the
        // buffer. Shortening the length to `pos` detaches the gap and the shifted tail.
        unsafe {
            // Overlapping move toward the end.
            ptr::copy(base.add(pos), base.add(pos + gap), tail);
            storage.set_len(pos);
        }

        // SAFETY: `[pos, pos + gap)` is now vacated.
        let writer = unsafe { SlotWriter::new(base.add(pos), gap) };

        Self {
            storage,
            pos,
            gap,
            tail,
            writer,
        }
    }

    pub(crate) fn commit(self) {
        let mut this = ManuallyDrop::new(self);
        debug_assert_eq!(this.writer.written(), this.gap, "GapGuard::commit: gap not filled");

        let len = this.pos + this.gap + this.tail;

        // SAFETY: prefix, gap and shifted tail are all live.
        unsafe { this.storage.set_len(len) };
        this.storage.assert_invariants();
    }
}

impl<T, A: Allocator> Drop for GapGuard<'_, T, A> {
    fn drop(&mut self) {
        let base = self.storage.ptr().as_ptr();

        // SAFETY: the gap holds exactly the slots the writer filled; dropping them and
        // shifting the tail back restores the layout `open` started from.
        unsafe {
            self.writer.drop_written();
            ptr::copy(base.add(self.pos + self.gap), base.add(self.pos), self.tail);
            self.storage.set_len(self.pos + self.tail);
        }
    }
}
