// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Erasure, truncation and predicate-driven removal.
//!
//! Destructors may panic. Every operation here shortens the logical end before running
//! them, so a panicking destructor can leak elements but never exposes a dropped one.

use core::ops::{Range, RangeBounds};
use core::ptr;

use rampart_alloc::Allocator;

use crate::error::VecError;
use crate::vec::RampartVec;

/// Resolves `range` against `len`.
pub(crate) fn resolve_range<R>(range: R, len: usize) -> Result<Range<usize>, VecError>
where
    R: RangeBounds<usize>,
{
    use core::ops::Bound;

    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start
            .checked_add(1)
            .ok_or(VecError::OutOfRange { index: start, len })?,
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(&end) => end
            .checked_add(1)
            .ok_or(VecError::OutOfRange { index: end, len })?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if end > len {
        return Err(VecError::OutOfRange { index: end, len });
    }

    if start > end {
        return Err(VecError::OutOfRange { index: start, len });
    }

    Ok(start..end)
}

impl<T, A: Allocator> RampartVec<T, A> {
    /// Removes and returns the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();

        if len == 0 {
            return None;
        }

        // SAFETY: slot `len - 1` was live and is now outside the live range.
        unsafe {
            self.set_len(len - 1);
            Some(self.as_ptr().add(len - 1).read())
        }
    }

    /// Removes and returns the element at `pos`, shifting the tail down by one.
    ///
    /// `O(len - pos)`. Positions before `pos` are not moved.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> Result<T, VecError> {
        let len = self.len();

        if pos >= len {
            return Err(VecError::OutOfRange { index: pos, len });
        }

        // SAFETY: `pos < len`; the value is read out once and the tail closes over its slot.
        unsafe {
            let base = self.as_mut_ptr();
            let value = base.add(pos).read();

            ptr::copy(base.add(pos + 1), base.add(pos), len - pos - 1);
            self.set_len(len - 1);

            Ok(value)
        }
    }

    /// Removes the elements in `range`, shifting the tail down.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] if the range is inverted or ends past `len()`.
    pub fn erase_range<R>(&mut self, range: R) -> Result<(), VecError>
    where
        R: RangeBounds<usize>,
    {
        self.drain(range).map(drop)
    }

    /// Removes and returns the element at `pos` by moving the last element into its slot.
    ///
    /// `O(1)`, but does not preserve order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// fn example() -> Result<(), VecError> {
    ///     let mut vec = RampartVec::from_slice(&[10, 20, 30, 40])?;
    ///
    ///     assert_eq!(vec.erase_unordered(1)?, 20);
    ///     assert_eq!(vec, [10, 40, 30]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn erase_unordered(&mut self, pos: usize) -> Result<T, VecError> {
        let len = self.len();

        if pos >= len {
            return Err(VecError::OutOfRange { index: pos, len });
        }

        // SAFETY: `pos < len`; the value is read out once and the last slot replaces it.
        unsafe {
            let base = self.as_mut_ptr();
            let value = base.add(pos).read();

            // `pos == len - 1` copies onto itself, which is fine.
            ptr::copy(base.add(len - 1), base.add(pos), 1);
            self.set_len(len - 1);

            Ok(value)
        }
    }

    /// Destroys every element past `new_len`. No-op if `new_len >= len()`.
    ///
    /// Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        let len = self.len();

        if new_len >= len {
            return;
        }

        // SAFETY: `[new_len, len)` is live and detached before any destructor runs.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(new_len), len - new_len);
            self.set_len(new_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Destroys every element. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving order.
    ///
    /// Returns the number of removed elements. If `keep` or a destructor panics, the
    /// vector still holds every element not yet removed (basic guarantee).
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|item| keep(item))
    }

    /// Like [`retain`](Self::retain), with mutable access to each element.
    pub fn retain_mut<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let original_len = self.len();

        // SAFETY: zero is always a valid length. Nothing is live while the compaction
        // runs; the guard restores the length.
        unsafe { self.set_len(0) };

        let mut guard = Compaction {
            vec: self,
            processed: 0,
            removed: 0,
            original_len,
        };

        while guard.processed < original_len {
            let base = guard.vec.as_mut_ptr();

            // SAFETY: `processed < original_len`, the slot is live and unvisited.
            let current = unsafe { &mut *base.add(guard.processed) };

            if keep(current) {
                if guard.removed > 0 {
                    // SAFETY: the destination slot was vacated by a removal.
                    unsafe {
                        ptr::copy_nonoverlapping(
                            base.add(guard.processed),
                            base.add(guard.processed - guard.removed),
                            1,
                        );
                    }
                }
                guard.processed += 1;
            } else {
                guard.processed += 1;
                guard.removed += 1;
                // SAFETY: the slot is live and now counted as removed.
                unsafe { ptr::drop_in_place(base.add(guard.processed - 1)) };
            }
        }

        guard.removed
    }
}

/// Restores the live range after (possibly interrupted) compaction.
struct Compaction<'a, T, A: Allocator> {
    vec: &'a mut RampartVec<T, A>,
    processed: usize,
    removed: usize,
    original_len: usize,
}

impl<T, A: Allocator> Drop for Compaction<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: `[processed, original_len)` is live and unvisited; moving it down by
        // `removed` lands right after the kept prefix.
        unsafe {
            if self.removed > 0 && self.processed < self.original_len {
                let base = self.vec.as_mut_ptr();
                ptr::copy(
                    base.add(self.processed),
                    base.add(self.processed - self.removed),
                    self.original_len - self.processed,
                );
            }

            self.vec.set_len(self.original_len - self.removed);
        }
    }
}

/// Removes every element equal to `value`. Returns how many were removed.
///
/// # Example
///
/// ```rust
/// use rampart_vec::{erase, RampartVec};
///
/// let mut vec = RampartVec::from_slice(&[1, 2, 1, 3, 1]).unwrap();
///
/// assert_eq!(erase(&mut vec, &1), 3);
/// assert_eq!(vec, [2, 3]);
/// ```
pub fn erase<T, A>(vec: &mut RampartVec<T, A>, value: &T) -> usize
where
    T: PartialEq,
    A: Allocator,
{
    vec.retain(|item| item != value)
}

/// Removes every element matching `pred`. Returns how many were removed.
pub fn erase_if<T, A, F>(vec: &mut RampartVec<T, A>, mut pred: F) -> usize
where
    A: Allocator,
    F: FnMut(&T) -> bool,
{
    vec.retain(|item| !pred(item))
}
