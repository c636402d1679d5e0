// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contiguous growable array with transactional growth.
//!
//! [`RampartVec`] stores its elements in one buffer obtained from an [`Allocator`] held by
//! composition. Every operation that may allocate or construct elements is transactional:
//!
//! - **Reallocation** builds the complete new layout in a fresh buffer (prefix, new
//!   values, suffix) and only then releases the old one. A refused allocation, a failing
//!   constructor or a panicking `Clone` leaves the vector exactly as it was.
//! - **In-place insertion** shifts the tail to open a gap, fills it, and shifts the tail
//!   back if filling fails.
//! - **Erasure** shortens the logical end before running destructors.
//!
//! Capacity doubles on growth (`0 -> 1 -> 2 -> 4 ...`) unless a single request needs
//! more, in which case exactly the requested size is allocated. `reserve` and
//! `shrink_to_fit` allocate exact sizes.
//!
//! # Errors
//!
//! Fallible operations return [`VecError`]. Operations taking a fallible closure are
//! generic over the caller's error type `E: From<VecError>`.
//!
//! # Invalidation
//!
//! Raw pointers from [`as_ptr`](RampartVec::as_ptr) stay valid until the next
//! reallocation. Insertion and erasure move every element at or after the mutation
//! point; elements before it stay where they are unless a reallocation happens. The
//! borrow checker enforces this for references.
//!
//! # Example
//!
//! ```rust
//! use rampart_vec::{erase_if, RampartVec, VecError};
//!
//! fn example() -> Result<(), VecError> {
//!     let mut vec: RampartVec<u32> = RampartVec::with_capacity(4)?;
//!
//!     vec.extend_from_slice(&[1, 2, 3, 4])?;
//!     vec.insert_n(2, 2, &0)?;
//!     assert_eq!(vec, [1, 2, 0, 0, 3, 4]);
//!     assert_eq!(vec.capacity(), 8);
//!
//!     assert_eq!(erase_if(&mut vec, |x| *x == 0), 2);
//!     assert_eq!(*vec.at(2)?, 3);
//!     assert!(vec.at(4).is_err());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod assign;
mod erase;
mod error;
mod guard;
mod insert;
mod iter;
mod macros;
mod raw_storage;
mod traits;
mod vec;

#[cfg(test)]
mod tests;

pub use erase::{erase, erase_if};
pub use error::VecError;
pub use iter::{Drain, IntoIter};
pub use rampart_alloc::{Allocator, Global};
pub use vec::RampartVec;

#[doc(hidden)]
pub use macros::__from_elem;
