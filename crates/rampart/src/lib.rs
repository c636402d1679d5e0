// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator-aware containers with transactional growth.
//!
//! Rampart bundles an allocator capability ([`alloc`]) and a growable array built on it
//! ([`vec`]). Every operation that may allocate reports failure as a value instead of
//! aborting, and leaves the container as it was when it fails.
//!
//! # Quick start
//!
//! ```rust
//! use rampart::prelude::*;
//!
//! fn example() -> Result<(), VecError> {
//!     let mut vec: RampartVec<u32> = RampartVec::new();
//!
//!     vec.reserve(100)?;
//!     for i in 0..100 {
//!         vec.push(i)?;
//!     }
//!
//!     vec.erase_range(10..90)?;
//!     assert_eq!(vec.len(), 20);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Custom allocators
//!
//! Anything implementing [`Allocator`](alloc::Allocator) can back a vector. Two vectors
//! whose allocators compare equal swap buffers in `O(1)`; otherwise elements are moved
//! across into fresh buffers from each side's own allocator.
//!
//! ```rust
//! # #[cfg(unix)]
//! # fn example() -> Result<(), rampart::vec::VecError> {
//! use rampart::alloc::PageAllocator;
//! use rampart::vec::RampartVec;
//!
//! let mut pages: RampartVec<u64, PageAllocator> = RampartVec::new_in(PageAllocator::new());
//! pages.extend_from_slice(&[1, 2, 3])?;
//!
//! let mut other = RampartVec::from_slice_in(&[9, 9], PageAllocator::new())?;
//! pages.swap(&mut other)?;
//!
//! assert_eq!(pages, [9, 9]);
//! # Ok(())
//! # }
//! # #[cfg(unix)]
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

pub use rampart_alloc as alloc;
pub use rampart_vec as vec;

pub use rampart_vec::rampart_vec;

/// Common imports.
pub mod prelude {
    pub use rampart_alloc::{Allocator, Global};
    pub use rampart_vec::{RampartVec, VecError, erase, erase_if, rampart_vec};
}

#[cfg(test)]
mod tests;
