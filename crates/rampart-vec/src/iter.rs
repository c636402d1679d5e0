// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owning and draining iterators.

use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ops::RangeBounds;
use core::ptr;
use core::slice;

use rampart_alloc::{Allocator, Global};

use crate::erase::resolve_range;
use crate::error::VecError;
use crate::raw_storage::RawStorage;
use crate::vec::RampartVec;

// =============================================================================
// IntoIter
// =============================================================================

/// Owning iterator over the elements of a [`RampartVec`].
///
/// Elements not yielded are destroyed when the iterator is dropped, then the buffer is
/// returned to the allocator.
pub struct IntoIter<T, A: Allocator = Global> {
    // Logical length is kept at zero; `[front, back)` are the live slots.
    buf: RawStorage<T, A>,
    front: usize,
    back: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(vec: RampartVec<T, A>) -> Self {
        let vec = ManuallyDrop::new(vec);

        // SAFETY: `vec` is never dropped, so the storage has exactly one owner.
        let mut buf = unsafe { ptr::read(&vec.buf) };
        let back = buf.len();

        // SAFETY: zero is always a valid length.
        unsafe { buf.set_len(0) };

        Self {
            buf,
            front: 0,
            back,
        }
    }

    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live.
        unsafe {
            slice::from_raw_parts(self.buf.ptr().as_ptr().add(self.front), self.back - self.front)
        }
    }

    /// Returns the elements not yet yielded, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[front, back)` is live and `&mut self` is unique.
        unsafe {
            slice::from_raw_parts_mut(self.buf.ptr().as_ptr().add(self.front), self.back - self.front)
        }
    }

    /// Returns the allocator that owns the buffer.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front += 1;

        // SAFETY: `index` was live and is now outside `[front, back)`.
        Some(unsafe { self.buf.ptr().as_ptr().add(index).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;

        // SAFETY: `back` was live and is now outside `[front, back)`.
        Some(unsafe { self.buf.ptr().as_ptr().add(self.back).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = self.as_mut_slice() as *mut [T];
        self.front = self.back;

        // SAFETY: the remaining slots are live and no longer reachable through `self`.
        // The buffer is released by `RawStorage` afterwards, even if a destructor panics.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

// =============================================================================
// Drain
// =============================================================================

/// Iterator removing a range from a [`RampartVec`], created by [`RampartVec::drain`].
///
/// When dropped, the elements not yielded are destroyed and the tail is shifted down to
/// close the hole. Leaking the iterator leaks the drained range and the tail, never
/// exposing moved-out slots.
pub struct Drain<'a, T, A: Allocator = Global> {
    vec: &'a mut RampartVec<T, A>,
    front: usize,
    back: usize,
    tail_start: usize,
    tail_len: usize,
}

impl<T, A: Allocator> RampartVec<T, A> {
    /// Removes `range` from the vector, yielding the removed elements in order.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] if the range is inverted or ends past `len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// fn example() -> Result<(), VecError> {
    ///     let mut vec = RampartVec::from_slice(&[1, 2, 3, 4, 5])?;
    ///
    ///     let drained: Vec<i32> = vec.drain(1..3)?.collect();
    ///     assert_eq!(drained, [2, 3]);
    ///     assert_eq!(vec, [1, 4, 5]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn drain<R>(&mut self, range: R) -> Result<Drain<'_, T, A>, VecError>
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let range = resolve_range(range, len)?;

        // SAFETY: `range.start <= len`. The drained range and the tail are detached until
        // the drain is dropped.
        unsafe { self.set_len(range.start) };

        Ok(Drain {
            vec: self,
            front: range.start,
            back: range.end,
            tail_start: range.end,
            tail_len: len - range.end,
        })
    }
}

impl<T, A: Allocator> Drain<'_, T, A> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live and detached from the vector.
        unsafe { slice::from_raw_parts(self.vec.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T, A: Allocator> Iterator for Drain<'_, T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front += 1;

        // SAFETY: `index` was live and is now outside `[front, back)`.
        Some(unsafe { self.vec.as_ptr().add(index).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for Drain<'_, T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;

        // SAFETY: `back` was live and is now outside `[front, back)`.
        Some(unsafe { self.vec.as_ptr().add(self.back).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for Drain<'_, T, A> {}

impl<T, A: Allocator> FusedIterator for Drain<'_, T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Drain<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        /// Closes the hole even if a destructor of a drained element panics.
        struct CloseHole<'r, 'a, T, A: Allocator>(&'r mut Drain<'a, T, A>);

        impl<T, A: Allocator> Drop for CloseHole<'_, '_, T, A> {
            fn drop(&mut self) {
                let drain = &mut *self.0;
                let start = drain.vec.len();

                // SAFETY: the tail is live and `start <= tail_start`, so it fits.
                unsafe {
                    let base = drain.vec.as_mut_ptr();
                    ptr::copy(base.add(drain.tail_start), base.add(start), drain.tail_len);
                    drain.vec.set_len(start + drain.tail_len);
                }
            }
        }

        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: `front <= back <= capacity`.
            unsafe { self.vec.as_mut_ptr().add(self.front) },
            self.back - self.front,
        );
        self.front = self.back;

        let _close = CloseHole(self);

        // SAFETY: unyielded drained elements are live and unreachable otherwise.
        unsafe { ptr::drop_in_place(remaining) };
    }
}
