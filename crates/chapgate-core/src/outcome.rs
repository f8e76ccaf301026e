// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Verification results handed back to the engine.

use core::fmt;

/// Maximum length, in bytes, of the message shown to the peer.
pub const MESSAGE_SPACE: usize = 256;

/// Tri-state decision for one CHAP attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerifyOutcome {
    /// The response matched the backend's secret.
    Accepted,
    /// The response did not match, or the backend could not be trusted.
    Rejected,
    /// No usable answer could be obtained from the backend.
    BackendUnavailable,
}

impl VerifyOutcome {
    /// Returns `true` only for [`VerifyOutcome::Accepted`].
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Turns an acceptance into a rejection; other outcomes are unchanged.
    #[inline]
    pub fn downgrade(self) -> Self {
        match self {
            Self::Accepted => Self::Rejected,
            other => other,
        }
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::BackendUnavailable => "backend unavailable",
        };

        f.write_str(text)
    }
}

/// Bounded, human-readable status text written by the digest checker.
///
/// Writes past the capacity are truncated at a character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage {
    text: String,
    capacity: usize,
}

impl ResponseMessage {
    /// Creates an empty message bounded by [`MESSAGE_SPACE`].
    pub fn new() -> Self {
        Self::with_capacity(MESSAGE_SPACE)
    }

    /// Creates an empty message bounded by `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends as much of `s` as fits.
    pub fn push_str(&mut self, s: &str) {
        let room = self.capacity - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
            return;
        }

        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]);
    }

    /// Replaces the contents with `s`, truncated to capacity.
    pub fn set(&mut self, s: &str) {
        self.text.clear();
        self.push_str(s);
    }

    /// Returns the message text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the byte bound of this message.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the message, returning `None` if it is empty.
    pub fn into_option(self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text)
        }
    }
}

impl Default for ResponseMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for ResponseMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// Decision plus the optional message for the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// The decision.
    pub outcome: VerifyOutcome,
    /// Status text for the CHAP success/failure packet, if any.
    pub message: Option<String>,
}

impl Verification {
    /// Builds a verification from an outcome and the digest's message.
    pub fn new(outcome: VerifyOutcome, message: ResponseMessage) -> Self {
        Self {
            outcome,
            message: message.into_option(),
        }
    }

    /// An acceptance without a message.
    pub fn accepted() -> Self {
        Self::bare(VerifyOutcome::Accepted)
    }

    /// A rejection without a message.
    pub fn rejected() -> Self {
        Self::bare(VerifyOutcome::Rejected)
    }

    /// An unavailable-backend result without a message.
    pub fn unavailable() -> Self {
        Self::bare(VerifyOutcome::BackendUnavailable)
    }

    fn bare(outcome: VerifyOutcome) -> Self {
        Self {
            outcome,
            message: None,
        }
    }

    /// Returns `true` if the attempt was accepted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    /// Downgrades an acceptance to a rejection, keeping the message.
    pub fn downgrade(mut self) -> Self {
        self.outcome = self.outcome.downgrade();
        self
    }
}
