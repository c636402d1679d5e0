// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Insertion, emplacement and growth.
//!
//! Every operation here funnels into [`RampartVec::insert_gap_with`], which decides
//! between filling an in-place gap and reallocating with a gap. Both paths run under a
//! rollback guard, so all of them give the strong guarantee.

use core::cmp;

use rampart_alloc::Allocator;

use crate::error::VecError;
use crate::guard::{GapGuard, SlotWriter};
use crate::raw_storage::grow_capacity;
use crate::vec::RampartVec;

impl<T, A: Allocator> RampartVec<T, A> {
    /// Opens a gap of `count` slots at `pos` and lets `fill` construct exactly `count`
    /// values into it.
    ///
    /// Uses spare capacity when it suffices (shifting the tail by `count`), otherwise
    /// reallocates to `max(grow_capacity(capacity), len + count)`. `count == 0` is a no-op
    /// that never allocates.
    pub(crate) fn insert_gap_with<E, F>(&mut self, pos: usize, count: usize, fill: F) -> Result<(), E>
    where
        E: From<VecError>,
        F: FnOnce(&mut SlotWriter<T>) -> Result<(), E>,
    {
        let len = self.len();

        if pos > len {
            return Err(VecError::OutOfRange { index: pos, len }.into());
        }

        if count == 0 {
            return Ok(());
        }

        let required = len.checked_add(count).ok_or(VecError::CapacityOverflow)?;

        if required <= self.capacity() {
            // SAFETY: `pos <= len` and `len + count <= capacity`.
            let mut guard = unsafe { GapGuard::open(&mut self.buf, pos, count) };
            fill(&mut guard.writer)?;
            guard.commit();

            return Ok(());
        }

        let capacity = cmp::max(grow_capacity(self.capacity()), required);
        self.relocate_with_gap(pos, count, capacity, fill)
    }

    // =========================================================================
    // Append
    // =========================================================================

    /// Appends `value` to the end.
    ///
    /// Amortized `O(1)`: when the buffer is full its capacity doubles.
    ///
    /// # Errors
    ///
    /// [`VecError::AllocFailed`] if growing fails; `value` is dropped and the vector is
    /// unchanged.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), VecError> {
        let len = self.len();

        if len < self.capacity() {
            // SAFETY: slot `len` is spare capacity.
            unsafe {
                self.as_mut_ptr().add(len).write(value);
                self.set_len(len + 1);
            }
            return Ok(());
        }

        self.insert_gap_with(len, 1, |writer| {
            writer.write(value);
            Ok(())
        })
    }

    /// Appends the value built by `make`.
    ///
    /// `make` runs only after room for the element is secured, and builds the value
    /// directly for its final slot.
    pub fn emplace_back<F>(&mut self, make: F) -> Result<(), VecError>
    where
        F: FnOnce() -> T,
    {
        self.try_push_with(|| Ok::<T, VecError>(make()))
    }

    /// Appends the value built by a fallible `make`.
    ///
    /// If `make` fails the vector is unchanged (including its buffer) and the error is
    /// returned.
    pub fn try_push_with<E, F>(&mut self, make: F) -> Result<(), E>
    where
        E: From<VecError>,
        F: FnOnce() -> Result<T, E>,
    {
        let len = self.len();
        self.try_emplace_with(len, make)
    }

    /// Moves every element of `other` to the end of `self`, leaving `other` empty.
    ///
    /// `other` may use a different allocator; its buffer is kept.
    pub fn append<B: Allocator>(&mut self, other: &mut RampartVec<T, B>) -> Result<(), VecError> {
        let len = self.len();
        self.insert_moved(len, other)
    }

    /// Appends clones of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        let len = self.len();
        self.insert_slice(len, items)
    }

    // =========================================================================
    // Positional insertion
    // =========================================================================

    /// Inserts `value` at `pos`, shifting `[pos, len)` one slot toward the end.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] if `pos > len()`, [`VecError::AllocFailed`] if growing
    /// fails. The vector is unchanged in both cases.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<(), VecError> {
        self.insert_gap_with(pos, 1, |writer| {
            writer.write(value);
            Ok(())
        })
    }

    /// Inserts the value built by `make` at `pos`.
    pub fn emplace<F>(&mut self, pos: usize, make: F) -> Result<(), VecError>
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_with(pos, || Ok::<T, VecError>(make()))
    }

    /// Inserts the value built by a fallible `make` at `pos`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// #[derive(Debug)]
    /// enum Error {
    ///     Vec(VecError),
    ///     Parse,
    /// }
    ///
    /// impl From<VecError> for Error {
    ///     fn from(err: VecError) -> Self {
    ///         Error::Vec(err)
    ///     }
    /// }
    ///
    /// let mut vec: RampartVec<u32> = RampartVec::from_slice(&[1, 3]).unwrap();
    ///
    /// let result = vec.try_emplace_with(1, || "x".parse::<u32>().map_err(|_| Error::Parse));
    /// assert!(matches!(result, Err(Error::Parse)));
    /// assert_eq!(vec, [1, 3]);
    ///
    /// vec.try_emplace_with(1, || "2".parse::<u32>().map_err(|_| Error::Parse)).unwrap();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    pub fn try_emplace_with<E, F>(&mut self, pos: usize, make: F) -> Result<(), E>
    where
        E: From<VecError>,
        F: FnOnce() -> Result<T, E>,
    {
        self.insert_gap_with(pos, 1, |writer| {
            writer.write(make()?);
            Ok(())
        })
    }

    /// Inserts `count` clones of `value` at `pos`.
    ///
    /// If a clone panics, the clones made so far are destroyed and the vector is restored
    /// before the panic continues.
    pub fn insert_n(&mut self, pos: usize, count: usize, value: &T) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.insert_gap_with(pos, count, |writer| {
            for _ in 0..count {
                writer.write(value.clone());
            }
            Ok(())
        })
    }

    /// Inserts clones of `items` at `pos`, preserving their order.
    pub fn insert_slice(&mut self, pos: usize, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.insert_gap_with(pos, items.len(), |writer| {
            for item in items {
                writer.write(item.clone());
            }
            Ok(())
        })
    }

    /// Inserts every item of `iter` at `pos`, preserving their order.
    ///
    /// The items are first collected into a staging vector from a clone of this vector's
    /// allocator, then moved into place in one step. A panicking iterator or a failed
    /// allocation leaves `self` unchanged.
    pub fn insert_iter<I>(&mut self, pos: usize, iter: I) -> Result<(), VecError>
    where
        I: IntoIterator<Item = T>,
        A: Clone,
    {
        let len = self.len();
        if pos > len {
            return Err(VecError::OutOfRange { index: pos, len });
        }

        let mut staged = RampartVec::from_iter_in(iter, self.allocator().clone())?;
        self.insert_moved(pos, &mut staged)
    }

    /// Moves all of `other` into `self` at `pos`.
    pub(crate) fn insert_moved<B: Allocator>(
        &mut self,
        pos: usize,
        other: &mut RampartVec<T, B>,
    ) -> Result<(), VecError> {
        let count = other.len();

        self.insert_gap_with(pos, count, |writer| {
            // SAFETY: `other` gives up its elements; its length is cleared right after so
            // nothing is dropped twice. Distinct buffers cannot overlap.
            unsafe {
                writer.move_from(other.as_ptr(), count);
                other.set_len(0);
            }
            Ok(())
        })
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// Shrinking destroys trailing elements. Growing has the strong guarantee.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), VecError>
    where
        T: Clone,
    {
        let len = self.len();

        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        let extra = new_len - len;
        self.insert_gap_with(len, extra, |writer| {
            for _ in 1..extra {
                writer.write(value.clone());
            }
            writer.write(value);
            Ok(())
        })
    }

    /// Resizes to `new_len`, filling new slots with values returned by `make`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut make: F) -> Result<(), VecError>
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(new_len, || Ok::<T, VecError>(make()))
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), VecError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len` with a fallible element constructor.
    ///
    /// If `make` fails part way, the elements built so far are destroyed and the vector
    /// is unchanged.
    pub fn try_resize_with<E, F>(&mut self, new_len: usize, mut make: F) -> Result<(), E>
    where
        E: From<VecError>,
        F: FnMut() -> Result<T, E>,
    {
        let len = self.len();

        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.insert_gap_with(len, new_len - len, |writer| {
            while writer.remaining() > 0 {
                writer.write(make()?);
            }
            Ok(())
        })
    }
}
