// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-vec.

use core::alloc::Layout;

use thiserror::Error;

/// Error type for `RampartVec` operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VecError {
    /// The allocator refused a request. The container is unchanged.
    #[error("allocation of {size} bytes (align {align}) failed")]
    AllocFailed {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment in bytes.
        align: usize,
    },

    /// The requested number of elements does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// An index or position lies outside the live range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length at the time of the call.
        len: usize,
    },
}

impl VecError {
    pub(crate) fn alloc_failed(layout: Layout) -> Self {
        Self::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }
}

/// Unwraps results on paths that cannot report errors (trait impls, macros).
///
/// Allocation failures go to the global allocation error handler, everything else panics,
/// mirroring the standard collections.
#[track_caller]
pub(crate) fn infallible<R>(result: Result<R, VecError>) -> R {
    match result {
        Ok(value) => value,
        Err(VecError::AllocFailed { size, align }) => match Layout::from_size_align(size, align) {
            Ok(layout) => alloc::alloc::handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        Err(err) => panic!("{err}"),
    }
}
