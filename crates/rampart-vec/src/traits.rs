// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Standard trait implementations.
//!
//! Traits whose signatures cannot carry a `Result` (`Clone`, `Extend`, `FromIterator`,
//! `From`) treat allocation failure as fatal, like the standard collections.

use alloc::vec::Vec;
use core::borrow::{Borrow, BorrowMut};
use core::cmp::{self, Ordering};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};
use core::slice;

use rampart_alloc::{Allocator, Global};

use crate::error::infallible;
use crate::iter::IntoIter;
use crate::raw_storage::grow_capacity;
use crate::vec::RampartVec;

// =============================================================================
// Views
// =============================================================================

impl<T, A: Allocator> Deref for RampartVec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for RampartVec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for RampartVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for RampartVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for RampartVec<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for RampartVec<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for RampartVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T, A: Allocator + Default> Default for RampartVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for RampartVec<T, A> {
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }

    /// Reuses the existing buffer when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        infallible(self.assign_slice(source.as_slice()));
    }
}

impl<T> FromIterator<T> for RampartVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        infallible(Self::from_iter_in(iter, Global))
    }
}

impl<T, const N: usize> From<[T; N]> for RampartVec<T> {
    fn from(items: [T; N]) -> Self {
        let mut vec = infallible(Self::with_capacity(N));

        for item in items {
            // Cannot reallocate: capacity is exactly N.
            infallible(vec.push(item));
        }

        vec
    }
}

impl<T: Clone> From<&[T]> for RampartVec<T> {
    fn from(items: &[T]) -> Self {
        infallible(Self::from_slice(items))
    }
}

impl<T, A: Allocator> From<RampartVec<T, A>> for Vec<T> {
    fn from(vec: RampartVec<T, A>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, A: Allocator> Extend<T> for RampartVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let wanted = self.len().saturating_add(iter.size_hint().0);

        if wanted > self.capacity() {
            infallible(self.reserve(cmp::max(grow_capacity(self.capacity()), wanted)));
        }

        for item in iter {
            infallible(self.push(item));
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for RampartVec<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

// =============================================================================
// Iteration
// =============================================================================

impl<T, A: Allocator> IntoIterator for RampartVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a RampartVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut RampartVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl<T, U, A, B> PartialEq<RampartVec<U, B>> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &RampartVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, A> PartialEq<[U]> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, A> PartialEq<&[U]> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, A> PartialEq<Vec<U>> for RampartVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for RampartVec<T, A> {}

impl<T: PartialOrd, A: Allocator, B: Allocator> PartialOrd<RampartVec<T, B>>
    for RampartVec<T, A>
{
    fn partial_cmp(&self, other: &RampartVec<T, B>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for RampartVec<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for RampartVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
