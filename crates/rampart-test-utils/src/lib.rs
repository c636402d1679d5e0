// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for rampart crates.
//!
//! - [`DropCounter`] / [`Tracked`]: values that record how often they were created and
//!   destroyed, to catch leaks and double drops.
//! - [`Fuse`] / [`CloneBomb`]: values whose `Clone` panics on demand, to drive rollback
//!   paths.
//! - [`PanicOnDrop`]: values whose destructor panics, to check removal under unwinding.
//! - [`index_permutations`] / [`apply_permutation`]: exhaustive ordering tests.
//!
//! ## License
//!
//! GPL-3.0-only

mod permutations;
mod elements;

pub use permutations::{apply_permutation, index_permutations};
pub use elements::{CloneBomb, DropCounter, Fuse, PanicOnDrop, Tracked};
