// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for chapgate-process.
use std::io;

use thiserror::Error;

/// Errors from a [`ChildProcessChannel`](crate::ChildProcessChannel).
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Pipes or process could not be created.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The child came up without one of its pipes.
    #[error("child process started without its {0} pipe")]
    MissingPipe(&'static str),

    /// The pipe was already closed by this side.
    #[error("{0} pipe is closed")]
    Closed(&'static str),

    /// The configured deadline passed.
    #[error("timed out waiting for backend process")]
    TimedOut,

    /// Reading, writing or waiting failed.
    #[error("pipe I/O failed: {0}")]
    Io(#[from] io::Error),
}
