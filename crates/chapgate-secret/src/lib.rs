// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fixed-capacity storage for CHAP secrets with zeroization on every exit path.
//!
//! A backend answers a secret lookup with a single line of bytes. That line
//! must live in exactly one place while the digest is checked, and that place
//! must be wiped before the lookup returns, whatever the outcome.
//!
//! # SecretBuffer
//!
//! - Heap storage of a fixed capacity, allocated once and never reallocated
//! - Best-effort `mlock` on Unix so the page is not swapped to disk
//! - Full backing storage zeroized on drop
//! - Redacted `Debug`
//!
//! # SecretScope
//!
//! [`SecretBuffer::scope`] hands out a guard that zeroizes the full backing
//! storage when it goes out of scope: normal return, early return, `?`
//! propagation and unwinding all pass through the guard's `Drop`.
//!
//! ```rust
//! use chapgate_secret::{SecretBuffer, SecretError};
//!
//! fn lookup(buffer: &mut SecretBuffer) -> Result<bool, SecretError> {
//!     let mut scope = buffer.scope();
//!     scope.fill(b"s3cret")?;
//!
//!     Ok(scope.as_slice() == b"s3cret")
//! }
//!
//! let mut buffer = SecretBuffer::acquire();
//! assert!(lookup(&mut buffer).unwrap());
//! assert!(buffer.is_zeroized());
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod lock;
mod scope;
mod secret_buffer;

pub use error::SecretError;
pub use scope::SecretScope;
pub use secret_buffer::SecretBuffer;

/// Longest secret a backend may hand back, in bytes.
pub const MAX_SECRET_LEN: usize = 256;

/// Default buffer capacity: a full-length secret plus its line terminator.
pub const SECRET_CAPACITY: usize = MAX_SECRET_LEN + 1;
