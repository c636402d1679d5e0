// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Content replacement and exchange.

use core::ptr;

use rampart_alloc::Allocator;

use crate::error::VecError;
use crate::raw_storage::RawStorage;
use crate::vec::RampartVec;

impl<T, A: Allocator> RampartVec<T, A> {
    /// Destroys the current contents and makes sure `count` elements fit.
    ///
    /// When the buffer is too small the replacement is allocated before anything is
    /// destroyed, so a refused allocation leaves the vector untouched.
    fn clear_for(&mut self, count: usize) -> Result<(), VecError> {
        if count <= self.capacity() {
            self.clear();
            return Ok(());
        }

        let ptr = RawStorage::<T, A>::allocate(self.buf.allocator(), count)?;
        self.clear();

        // SAFETY: `ptr` is fresh with `count` slots; the old buffer holds nothing live.
        unsafe { self.buf.install(ptr, count, 0) };

        Ok(())
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// Allocation failure leaves the vector unchanged. A panicking clone leaves it empty.
    pub fn assign(&mut self, count: usize, value: &T) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.clear_for(count)?;
        self.insert_n(0, count, value)
    }

    /// Replaces the contents with clones of `items`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// fn example() -> Result<(), VecError> {
    ///     let mut vec = RampartVec::from_slice(&["a", "b", "c"])?;
    ///
    ///     vec.assign_slice(&["x"])?;
    ///     assert_eq!(vec, ["x"]);
    ///     assert_eq!(vec.capacity(), 3);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn assign_slice(&mut self, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.clear_for(items.len())?;
        self.insert_slice(0, items)
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// The lower bound of the size hint is secured before the old contents are
    /// destroyed. Items past that bound are pushed one by one; if one of those pushes
    /// fails, the items appended so far are kept.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), VecError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.clear_for(iter.size_hint().0)?;

        for item in iter {
            self.push(item)?;
        }

        Ok(())
    }

    /// Exchanges the contents of two vectors. Allocators stay with their vectors.
    ///
    /// With equal allocators this swaps the buffers and cannot fail. Otherwise each
    /// vector receives a fresh buffer from its own allocator, sized exactly to the
    /// incoming length, and the elements are moved across. If either allocation fails,
    /// both vectors are unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// fn example() -> Result<(), VecError> {
    ///     let mut left = RampartVec::from_slice(&[1, 2, 3])?;
    ///     let mut right = RampartVec::from_slice(&[9])?;
    ///
    ///     left.swap(&mut right)?;
    ///     assert_eq!(left, [9]);
    ///     assert_eq!(right, [1, 2, 3]);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn swap(&mut self, other: &mut Self) -> Result<(), VecError> {
        if self.allocator() == other.allocator() {
            self.buf.swap_buffers(&mut other.buf);
            return Ok(());
        }

        let ours_len = self.len();
        let theirs_len = other.len();

        log::trace!(
            "RampartVec: swapping {ours_len} and {theirs_len} elements across unequal allocators"
        );

        let ours = RawStorage::<T, A>::allocate(self.buf.allocator(), theirs_len)?;
        let theirs = match RawStorage::<T, A>::allocate(other.buf.allocator(), ours_len) {
            Ok(ptr) => ptr,
            Err(err) => {
                // SAFETY: `ours` was just allocated with `theirs_len` slots and holds nothing.
                unsafe { RawStorage::<T, A>::free(self.buf.allocator(), ours, theirs_len) };
                return Err(err);
            }
        };

        unsafe {
            // SAFETY: both destinations are fresh buffers of the exact incoming length.
            ptr::copy_nonoverlapping(other.as_ptr(), ours.as_ptr(), theirs_len);
            ptr::copy_nonoverlapping(self.as_ptr(), theirs.as_ptr(), ours_len);

            // The old buffers are released without dropping: their elements moved out.
            self.buf.install(ours, theirs_len, theirs_len);
            other.buf.install(theirs, ours_len, ours_len);
        }

        Ok(())
    }
}
