// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-alloc.

use thiserror::Error;

/// The allocator could not satisfy a request.
///
/// Carries no detail on purpose: callers know the layout they asked for and
/// attach it to their own error type.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("memory allocation failed")]
pub struct AllocError;
