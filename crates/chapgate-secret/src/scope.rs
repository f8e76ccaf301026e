// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RAII scope that zeroizes a borrowed [`SecretBuffer`] on exit.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::secret_buffer::SecretBuffer;

/// Exclusive borrow of a [`SecretBuffer`] that zeroizes it on drop.
///
/// The guard owns no copy of the data; it only ties the wipe to the end of
/// the lexical scope so that no exit path can skip it.
pub struct SecretScope<'a> {
    buffer: &'a mut SecretBuffer,
}

impl<'a> SecretScope<'a> {
    pub(crate) fn new(buffer: &'a mut SecretBuffer) -> Self {
        Self { buffer }
    }
}

impl Deref for SecretScope<'_> {
    type Target = SecretBuffer;

    fn deref(&self) -> &Self::Target {
        self.buffer
    }
}

impl DerefMut for SecretScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buffer
    }
}

impl fmt::Debug for SecretScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SecretScope]")
    }
}

impl Drop for SecretScope<'_> {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}
