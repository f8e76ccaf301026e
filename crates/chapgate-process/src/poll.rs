// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Deadline-bounded readiness wait on a pipe descriptor.

use std::io;
use std::os::fd::RawFd;
use std::time::Instant;

use crate::error::ChannelError;

/// Blocks until `fd` is readable, hung up, or `deadline` passes.
///
/// Without a deadline this returns immediately and the following read blocks.
pub(crate) fn wait_readable(fd: RawFd, deadline: Option<Instant>) -> Result<(), ChannelError> {
    let Some(deadline) = deadline else {
        return Ok(());
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ChannelError::TimedOut);
        }

        let timeout_ms = remaining.as_millis().clamp(1, i32::MAX as u128) as libc::c_int;
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };

        let rc = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };

        // POLLHUP and POLLERR also end the wait; the read reports them.
        if rc > 0 {
            return Ok(());
        }

        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(ChannelError::Io(err));
            }
        }
    }
}
