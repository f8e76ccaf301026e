// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::sync::atomic::{Ordering, compiler_fence};

use zeroize::Zeroize;

use crate::error::SecretError;
use crate::lock;
use crate::scope::SecretScope;
use crate::SECRET_CAPACITY;

/// Fixed-capacity buffer for secret material.
///
/// The backing storage is allocated once with its final capacity and never
/// grows, so no abandoned allocation can hold a stale copy. Only the first
/// [`len`](SecretBuffer::len) bytes are meaningful; the rest is kept zeroed.
///
/// # Design
///
/// - No `Clone`, no `Deref`: bytes are reachable only through
///   [`as_slice`](SecretBuffer::as_slice)
/// - Redacted `Debug`
/// - [`zeroize`](SecretBuffer::zeroize) always wipes the full capacity, not
///   just the live prefix
/// - Drop zeroizes and unlocks the storage
pub struct SecretBuffer {
    storage: Box<[u8]>,
    len: usize,
    locked: bool,
}

impl SecretBuffer {
    /// Acquires a buffer sized for one backend secret line.
    pub fn acquire() -> Self {
        Self::with_capacity(SECRET_CAPACITY)
    }

    /// Acquires a buffer with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let storage = vec![0u8; capacity].into_boxed_slice();
        let locked = lock::lock(&storage);

        Self {
            storage,
            len: 0,
            locked,
        }
    }

    /// Replaces the contents with `bytes`.
    ///
    /// On [`SecretError::TooLong`] the buffer is left zeroized and empty.
    pub fn fill(&mut self, bytes: &[u8]) -> Result<(), SecretError> {
        self.zeroize();

        if bytes.len() > self.storage.len() {
            return Err(SecretError::TooLong {
                len: bytes.len(),
                capacity: self.storage.len(),
            });
        }

        self.storage[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();

        Ok(())
    }

    /// Lets `f` write directly into the full backing storage.
    ///
    /// `f` returns how many leading bytes it produced. The buffer is zeroized
    /// before `f` runs and again if `f` fails, so a failed writer never leaves
    /// partial secret material behind.
    pub fn fill_with<E, F>(&mut self, f: F) -> Result<usize, E>
    where
        F: FnOnce(&mut [u8]) -> Result<usize, E>,
    {
        self.zeroize();

        match f(&mut self.storage[..]) {
            Ok(written) => {
                self.len = written.min(self.storage.len());
                Ok(self.len)
            }
            Err(e) => {
                self.zeroize();
                Err(e)
            }
        }
    }

    /// Shortens the live prefix to `len`, zeroizing the bytes cut off.
    ///
    /// Does nothing if `len` is not shorter than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        self.storage[len..self.len].zeroize();
        compiler_fence(Ordering::SeqCst);
        self.len = len;
    }

    /// Returns the live secret bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Returns the number of live bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no secret bytes are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if `mlock` succeeded on the backing storage.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Overwrites the full backing storage with zeros and empties the buffer.
    pub fn zeroize(&mut self) {
        self.storage[..].zeroize();
        compiler_fence(Ordering::SeqCst);
        self.len = 0;
    }

    /// Returns `true` if every byte of the backing storage is zero.
    pub fn is_zeroized(&self) -> bool {
        self.storage.iter().all(|&b| b == 0)
    }

    /// Opens a scope whose end zeroizes this buffer unconditionally.
    pub fn scope(&mut self) -> SecretScope<'_> {
        SecretScope::new(self)
    }
}

impl Default for SecretBuffer {
    fn default() -> Self {
        Self::acquire()
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SecretBuffer]")
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        self.zeroize();

        if self.locked {
            lock::unlock(&self.storage);
        }
    }
}
