// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator capability for rampart containers.
//!
//! Containers never talk to the system allocator directly. They hold an [`Allocator`]
//! by composition and ask it for raw, untyped blocks described by a [`Layout`].
//! Two allocator values that compare equal can free each other's blocks, which is
//! what lets a container exchange buffers with a pointer swap instead of moving
//! every element.
//!
//! # Allocators
//!
//! - [`Global`]: the process-wide global allocator. All instances are equal.
//! - [`PageAllocator`] (Unix only): anonymous `mmap` mappings rounded to whole pages.
//! - `TrackingAllocator` (`test_utils` feature): counts traffic and injects failures.
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//! use rampart_alloc::{AllocError, Allocator, Global};
//!
//! fn example() -> Result<(), AllocError> {
//!     let layout = Layout::array::<u64>(16).map_err(|_| AllocError)?;
//!     let ptr = Global.allocate(layout)?;
//!
//!     // SAFETY: `ptr` was returned by `Global.allocate` with the same layout.
//!     unsafe { Global.deallocate(ptr, layout) };
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! [`Layout`]: core::alloc::Layout

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod global;
mod traits;

#[cfg(unix)]
mod page;

#[cfg(any(test, feature = "test_utils"))]
mod tracking;

#[cfg(test)]
mod tests;

pub use error::AllocError;
pub use global::Global;
pub use traits::Allocator;

#[cfg(unix)]
pub use page::PageAllocator;

#[cfg(any(test, feature = "test_utils"))]
pub use tracking::{AllocatorBehaviour, TrackingAllocator};
