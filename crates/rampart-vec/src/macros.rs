// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::infallible;
use crate::vec::RampartVec;

/// Creates a [`RampartVec`](crate::RampartVec) backed by the global allocator.
///
/// Allocation failure is fatal, as with `vec!`.
///
/// # Example
///
/// ```rust
/// use rampart_vec::{rampart_vec, RampartVec};
///
/// let empty: RampartVec<u8> = rampart_vec![];
/// let zeros = rampart_vec![0u8; 4];
/// let list = rampart_vec![1, 2, 3];
///
/// assert!(empty.is_empty());
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// assert_eq!(list, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! rampart_vec {
    () => {
        $crate::RampartVec::new()
    };
    ($value:expr; $n:expr) => {
        $crate::__from_elem($value, $n)
    };
    ($($item:expr),+ $(,)?) => {
        <$crate::RampartVec<_> as ::core::convert::From<_>>::from([$($item),+])
    };
}

#[doc(hidden)]
pub fn __from_elem<T: Clone>(value: T, n: usize) -> RampartVec<T> {
    infallible(RampartVec::from_elem(value, n))
}
