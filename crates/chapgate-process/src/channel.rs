// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owned child process with a line-oriented pipe pair.

use core::fmt;
use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use chapgate_secret::SecretBuffer;

use crate::error::ChannelError;
use crate::poll::wait_readable;

const REAP_POLL_INTERVAL: Duration = Duration::from_millis(10);
const DRAIN_CHUNK: usize = 4096;

/// How a reaped child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Normal exit with this status code.
    Code(i32),
    /// Terminated by this signal.
    Signal(i32),
}

impl ChildExit {
    /// `true` only for exit code 0.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Code(0))
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Code(code),
            (None, Some(signal)) => Self::Signal(signal),
            (None, None) => Self::Code(-1),
        }
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit status {code}"),
            Self::Signal(signal) => write!(f, "killed by signal {signal}"),
        }
    }
}

/// Result of one [`ChildProcessChannel::read_line_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// The child closed its output before sending a byte.
    Eof,
    /// A line of this many bytes, terminator stripped.
    Line(usize),
    /// The buffer filled up before a terminator arrived.
    Truncated(usize),
}

/// A spawned child with its stdin and stdout held as pipes.
///
/// The child inherits stderr. Dropping the channel drains and closes both
/// pipes and reaps the child; the child is never left as a zombie and never reaped
/// twice.
pub struct ChildProcessChannel {
    program: PathBuf,
    child: Child,
    to_child: Option<ChildStdin>,
    from_child: Option<ChildStdout>,
    exit: Option<ChildExit>,
    deadline: Option<Instant>,
}

impl ChildProcessChannel {
    /// Starts `program` with `args`, wiring its stdin and stdout to pipes.
    ///
    /// Descriptors created before a failure are released before returning.
    pub fn spawn<I, S>(program: impl AsRef<Path>, args: I) -> Result<Self, ChannelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref().to_path_buf();

        let mut child = Command::new(&program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ChannelError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        let to_child = child.stdin.take();
        let from_child = child.stdout.take();

        let (Some(to_child), Some(from_child)) = (to_child, from_child) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ChannelError::MissingPipe("stdio"));
        };

        tracing::debug!(program = %program.display(), pid = child.id(), "spawned backend process");

        Ok(Self {
            program,
            child,
            to_child: Some(to_child),
            from_child: Some(from_child),
            exit: None,
            deadline: None,
        })
    }

    /// Bounds all further reads and the final wait to `timeout` from now.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.deadline = Instant::now().checked_add(timeout);
    }

    /// Program this channel was spawned from.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// OS process id of the child.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Exit status, once the child has been reaped.
    pub fn exit(&self) -> Option<ChildExit> {
        self.exit
    }

    /// Reads one line from the child straight into `buffer`.
    ///
    /// Bytes are read one at a time with no intermediate buffering, stopping
    /// after the first `\n` so nothing beyond the line is consumed. A trailing
    /// `\n` or `\r\n` is stripped. A final line without terminator is returned
    /// as is. If the buffer fills first, the bytes read so far are kept and
    /// [`LineRead::Truncated`] is returned.
    ///
    /// On error the buffer is left zeroized.
    pub fn read_line_into(&mut self, buffer: &mut SecretBuffer) -> Result<LineRead, ChannelError> {
        let deadline = self.deadline;
        let reader = self
            .from_child
            .as_mut()
            .ok_or(ChannelError::Closed("from-child"))?;

        let n = buffer.fill_with(|slot| read_raw_line(reader, slot, deadline))?;
        if n == 0 {
            return Ok(LineRead::Eof);
        }

        let bytes = buffer.as_slice();
        if bytes[n - 1] != b'\n' {
            if n == buffer.capacity() {
                return Ok(LineRead::Truncated(n));
            }
            return Ok(LineRead::Line(n));
        }

        let mut end = n - 1;
        if end > 0 && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        buffer.truncate(end);

        Ok(LineRead::Line(end))
    }

    /// Reads one line into a fresh vector, consuming at most `max_len` bytes
    /// (terminator included).
    ///
    /// Returns `None` at end of stream. For secret material use
    /// [`read_line_into`](Self::read_line_into) instead.
    pub fn read_line(&mut self, max_len: usize) -> Result<Option<Vec<u8>>, ChannelError> {
        let mut buffer = SecretBuffer::with_capacity(max_len);

        match self.read_line_into(&mut buffer)? {
            LineRead::Eof => Ok(None),
            LineRead::Line(_) | LineRead::Truncated(_) => Ok(Some(buffer.as_slice().to_vec())),
        }
    }

    /// Writes `bytes` followed by `\n` and flushes.
    pub fn write_line(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        let writer = self
            .to_child
            .as_mut()
            .ok_or(ChannelError::Closed("to-child"))?;

        writer.write_all(bytes)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }

    /// Closes the to-child pipe so the child sees end of input.
    pub fn close_input(&mut self) {
        self.to_child.take();
    }

    /// Closes the input pipe, discards remaining output until end of stream,
    /// then reaps the child.
    ///
    /// Draining keeps a child that writes past what was read from blocking
    /// on a full pipe, and from dying of `SIGPIPE` on a closed one. With a
    /// timeout set, draining stops at the deadline and a child still running
    /// is killed. Calling this again returns the cached status.
    pub fn wait(&mut self) -> Result<ChildExit, ChannelError> {
        if let Some(exit) = self.exit {
            return Ok(exit);
        }

        self.to_child.take();
        self.drain_output();

        let status = match self.deadline {
            None => self.child.wait()?,
            Some(deadline) => self.wait_until(deadline)?,
        };

        let exit = ChildExit::from(status);
        self.exit = Some(exit);

        tracing::debug!(program = %self.program.display(), %exit, "reaped backend process");

        Ok(exit)
    }

    fn drain_output(&mut self) {
        let Some(mut reader) = self.from_child.take() else {
            return;
        };

        let fd = reader.as_raw_fd();
        // Trailing output may repeat the secret; it is wiped on drop.
        let mut scratch = SecretBuffer::with_capacity(DRAIN_CHUNK);
        let mut discarded = 0usize;

        loop {
            if let Err(e) = wait_readable(fd, self.deadline) {
                tracing::debug!(program = %self.program.display(), "stopped draining backend output: {e}");
                break;
            }

            match scratch.fill_with(|slot| reader.read(slot)) {
                Ok(0) => break,
                Ok(n) => discarded += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!(program = %self.program.display(), "stopped draining backend output: {e}");
                    break;
                }
            }
        }

        if discarded > 0 {
            tracing::debug!(program = %self.program.display(), discarded, "discarded trailing backend output");
        }
    }

    fn wait_until(&mut self, deadline: Instant) -> io::Result<ExitStatus> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    program = %self.program.display(),
                    pid = self.child.id(),
                    "backend process exceeded its timeout; killing it"
                );

                // Fails only if the child already exited; wait() picks that up.
                let _ = self.child.kill();
                return self.child.wait();
            }

            thread::sleep(remaining.min(REAP_POLL_INTERVAL));
        }
    }

    /// Tears the channel down. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.exit.is_some() {
            return;
        }

        if let Err(e) = self.wait() {
            tracing::error!(program = %self.program.display(), "failed to reap backend process: {e}");
        }
    }
}

impl fmt::Debug for ChildProcessChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildProcessChannel")
            .field("program", &self.program)
            .field("pid", &self.child.id())
            .field("input_open", &self.to_child.is_some())
            .field("output_open", &self.from_child.is_some())
            .field("exit", &self.exit)
            .finish()
    }
}

impl Drop for ChildProcessChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Reads byte by byte into `dst` until `\n`, end of stream, or `dst` is full.
///
/// Returns the number of bytes stored, terminator included.
fn read_raw_line(
    reader: &mut ChildStdout,
    dst: &mut [u8],
    deadline: Option<Instant>,
) -> Result<usize, ChannelError> {
    let fd = reader.as_raw_fd();
    let mut filled = 0;

    while filled < dst.len() {
        wait_readable(fd, deadline)?;

        match reader.read(&mut dst[filled..filled + 1]) {
            Ok(0) => break,
            Ok(_) => {
                filled += 1;
                if dst[filled - 1] == b'\n' {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ChannelError::Io(e)),
        }
    }

    Ok(filled)
}
