// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Best-effort memory locking for secret storage.
//!
//! Failure to lock is not an error: unprivileged processes commonly hit
//! `RLIMIT_MEMLOCK`. The buffer records whether the lock took effect.

#[cfg(unix)]
pub(crate) fn lock(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    unsafe { libc::mlock(bytes.as_ptr() as *const libc::c_void, bytes.len()) == 0 }
}

#[cfg(unix)]
pub(crate) fn unlock(bytes: &[u8]) {
    unsafe { libc::munlock(bytes.as_ptr() as *const libc::c_void, bytes.len()) };
}

#[cfg(not(unix))]
pub(crate) fn lock(_bytes: &[u8]) -> bool {
    false
}

#[cfg(not(unix))]
pub(crate) fn unlock(_bytes: &[u8]) {}
