// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for chapgate-secret.
use thiserror::Error;

/// Errors that can occur when writing into a [`SecretBuffer`](crate::SecretBuffer).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum SecretError {
    /// The secret does not fit into the buffer.
    #[error("secret of {len} bytes exceeds buffer capacity of {capacity} bytes")]
    TooLong {
        /// Length of the rejected input.
        len: usize,
        /// Capacity of the buffer.
        capacity: usize,
    },
}
