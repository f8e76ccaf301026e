// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Out-of-process CHAP backend.
//!
//! For every authentication attempt the configured program is started with
//! the peer name as its only argument. It answers with one line on stdout:
//! the shared secret for that peer. The secret goes straight from the pipe
//! into a [`SecretBuffer`](chapgate_secret::SecretBuffer), is checked by the
//! engine's digest, and is wiped before the attempt returns. The program's
//! exit status then gates the decision: a backend that printed a secret and
//! exited unsuccessfully is not trusted.
//!
//! # ChildProcessChannel
//!
//! Owns the child and both pipe ends:
//! - stdin of the child is the to-child pipe, stdout is the from-child pipe
//! - the child-side ends are closed in the parent right after spawning
//! - reads are unbuffered, so no secret byte is copied into a reader buffer
//! - [`wait`](ChildProcessChannel::wait) discards whatever the child still
//!   writes until end of stream before reaping, so a chatty child neither
//!   deadlocks on a full pipe nor dies of `SIGPIPE`
//! - teardown is idempotent and runs on drop
//!
//! # Timeouts
//!
//! By default reads and waits block for as long as the program takes. A
//! timeout can be set on [`ProcessConfig`]; once it elapses, reads fail and
//! the child is killed.
//!
//! # Platform support
//!
//! Unix only.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(not(unix))]
compile_error!("chapgate-process requires a Unix platform");

#[cfg(test)]
mod tests;

mod adapter;
mod channel;
mod error;
mod poll;

pub use adapter::{ProcessBackendAdapter, ProcessConfig};
pub use channel::{ChildExit, ChildProcessChannel, LineRead};
pub use error::ChannelError;
