// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ptr;
use core::slice;

use rampart_alloc::{Allocator, Global};

use crate::error::VecError;
use crate::guard::RelocationGuard;
use crate::raw_storage::RawStorage;

/// A contiguous growable array with an explicit allocator.
///
/// `[0, len)` holds live elements, `[len, capacity)` is raw memory reserved for growth.
/// A vector with zero capacity owns no buffer at all.
///
/// Operations that may allocate return `Result`. When they fail, whether because the
/// allocator refused or because constructing a new element failed, the vector is left
/// exactly as it was before the call.
///
/// # Example
///
/// ```rust
/// use rampart_vec::{RampartVec, VecError};
///
/// fn example() -> Result<(), VecError> {
///     let mut vec = RampartVec::new();
///
///     for i in 1..=5 {
///         vec.push(i)?;
///     }
///
///     vec.insert(2, 99)?;
///     assert_eq!(vec, [1, 2, 99, 3, 4, 5]);
///
///     vec.erase(2)?;
///     assert_eq!(vec, [1, 2, 3, 4, 5]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct RampartVec<T, A: Allocator = Global> {
    pub(crate) buf: RawStorage<T, A>,
}

impl<T> RampartVec<T> {
    /// Creates an empty vector backed by the global allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// [`VecError::AllocFailed`] or [`VecError::CapacityOverflow`].
    pub fn with_capacity(capacity: usize) -> Result<Self, VecError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a vector of `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Result<Self, VecError>
    where
        T: Clone,
    {
        Self::from_elem_in(value, n, Global)
    }

    /// Creates a vector of `n` default-valued elements.
    pub fn with_len(n: usize) -> Result<Self, VecError>
    where
        T: Default,
    {
        Self::with_len_in(n, Global)
    }

    /// Creates a vector holding clones of `items`.
    pub fn from_slice(items: &[T]) -> Result<Self, VecError>
    where
        T: Clone,
    {
        Self::from_slice_in(items, Global)
    }
}

impl<T, A: Allocator> RampartVec<T, A> {
    /// Creates an empty vector using `alloc`. Makes no allocator call.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawStorage::new_in(alloc),
        }
    }

    /// Creates an empty vector using `alloc` with room for exactly `capacity` elements.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, VecError> {
        Ok(Self {
            buf: RawStorage::with_capacity_in(capacity, alloc)?,
        })
    }

    /// Creates a vector of `n` clones of `value` using `alloc`.
    pub fn from_elem_in(value: T, n: usize, alloc: A) -> Result<Self, VecError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(n, alloc)?;
        vec.resize(n, value)?;
        Ok(vec)
    }

    /// Creates a vector of `n` default-valued elements using `alloc`.
    pub fn with_len_in(n: usize, alloc: A) -> Result<Self, VecError>
    where
        T: Default,
    {
        let mut vec = Self::with_capacity_in(n, alloc)?;
        vec.resize_default(n)?;
        Ok(vec)
    }

    /// Creates a vector holding clones of `items` using `alloc`.
    pub fn from_slice_in(items: &[T], alloc: A) -> Result<Self, VecError>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(items.len(), alloc)?;
        vec.insert_slice(0, items)?;
        Ok(vec)
    }

    /// Creates a vector from an iterator using `alloc`.
    ///
    /// The lower bound of the iterator's size hint is reserved up front.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Result<Self, VecError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut vec = Self::with_capacity_in(iter.size_hint().0, alloc)?;

        for item in iter {
            vec.push(item)?;
        }

        Ok(vec)
    }

    /// Returns a clone of this vector in an allocator equal to this one.
    ///
    /// The clone's capacity equals its length.
    pub fn try_clone(&self) -> Result<Self, VecError>
    where
        T: Clone,
        A: Clone,
    {
        Self::from_slice_in(self.as_slice(), self.buf.allocator().clone())
    }

    // =========================================================================
    // Size and capacity
    // =========================================================================

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots backed by the buffer.
    ///
    /// Zero-sized element types never allocate and report `usize::MAX`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns how many elements fit before the next reallocation.
    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Returns the allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Ensures room for at least `capacity` elements in total.
    ///
    /// A no-op when `capacity <= self.capacity()`. Otherwise the buffer is rebuilt with
    /// exactly `capacity` slots; a failed allocation leaves the vector untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{RampartVec, VecError};
    ///
    /// fn example() -> Result<(), VecError> {
    ///     let mut vec: RampartVec<u32> = RampartVec::new();
    ///     vec.reserve(100)?;
    ///
    ///     assert_eq!(vec.len(), 0);
    ///     assert!(vec.capacity() >= 100);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        self.relocate(capacity)
    }

    /// Rebuilds the buffer with exactly `capacity` slots.
    ///
    /// Elements past `capacity` are destroyed first. `set_capacity(0)` releases the buffer.
    /// If the final allocation fails, the truncation has already happened (basic guarantee)
    /// but no element within the requested capacity is lost.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), VecError> {
        self.truncate(capacity);

        if capacity == self.capacity() {
            return Ok(());
        }

        self.relocate(capacity)
    }

    /// Shrinks the buffer so that `capacity() == len()`.
    pub fn shrink_to_fit(&mut self) -> Result<(), VecError> {
        self.set_capacity(self.len())
    }

    /// Moves every live element into a new buffer of exactly `capacity` slots.
    pub(crate) fn relocate(&mut self, capacity: usize) -> Result<(), VecError> {
        self.relocate_with_gap(self.len(), 0, capacity, |_| Ok(()))
    }

    /// Reallocation with a gap: the core growth algorithm.
    ///
    /// 1. Allocate the new buffer. Failure returns before anything is touched.
    /// 2. Copy `[0, pos)` to the start of the new buffer. These are bitwise copies; the
    ///    old buffer keeps ownership until commit.
    /// 3. Construct the gap values through `fill`.
    /// 4. Copy `[pos, len)` after the gap.
    /// 5. Commit: free the old buffer without dropping (its values now live in the new
    ///    one) and install the new cursors.
    ///
    /// If `fill` fails or panics, the guard destroys the gap values and frees the new
    /// buffer; the old buffer was never written.
    pub(crate) fn relocate_with_gap<E, F>(
        &mut self,
        pos: usize,
        gap: usize,
        capacity: usize,
        fill: F,
    ) -> Result<(), E>
    where
        E: From<VecError>,
        F: FnOnce(&mut crate::guard::SlotWriter<T>) -> Result<(), E>,
    {
        let len = self.len();
        debug_assert!(pos <= len && len + gap <= capacity);

        let new_ptr = RawStorage::<T, A>::allocate(self.buf.allocator(), capacity)?;
        let old_ptr = self.buf.ptr().as_ptr();

        log::trace!(
            "RampartVec: relocating {len} elements, capacity {} -> {capacity}, gap {gap} at {pos}",
            self.capacity()
        );

        // SAFETY: `new_ptr` was allocated with `capacity` slots and `pos + gap <= capacity`.
        let mut guard =
            unsafe { RelocationGuard::new(self.buf.allocator(), new_ptr, capacity, pos, gap) };

        // SAFETY: the prefix `[0, pos)` is live and the buffers are distinct.
        unsafe { ptr::copy_nonoverlapping(old_ptr, new_ptr.as_ptr(), pos) };

        fill(&mut guard.writer)?;
        debug_assert_eq!(guard.writer.written(), gap, "relocate_with_gap: gap not filled");

        // SAFETY: the tail `[pos, len)` lands after the gap, inside `capacity`.
        unsafe {
            ptr::copy_nonoverlapping(old_ptr.add(pos), new_ptr.as_ptr().add(pos + gap), len - pos)
        };

        let (ptr, cap) = guard.commit();

        // SAFETY: every live element was transferred into `ptr`.
        unsafe { self.buf.install(ptr, cap, len + gap) };

        Ok(())
    }

    // =========================================================================
    // Element access
    // =========================================================================

    /// Returns a raw pointer to the buffer.
    ///
    /// Never null, also when the vector is empty; it must not be dereferenced then.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// Returns a raw mutable pointer to the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live and the pointer is non-null and aligned.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: as above, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// [`VecError::OutOfRange`] when `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(VecError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VecError::OutOfRange { index, len })
    }

    /// Returns the first element, if any.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, if any.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, if any.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Sets the logical length.
    ///
    /// # Safety
    ///
    /// `new_len <= capacity()` and `[0, new_len)` must be initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        // SAFETY: forwarded contract.
        unsafe { self.buf.set_len(new_len) };
    }
}

impl<T, A: Allocator> Drop for RampartVec<T, A> {
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len());

        // SAFETY: `[0, len)` is live; the buffer itself is released by `RawStorage`.
        unsafe { ptr::drop_in_place(live) };
    }
}
