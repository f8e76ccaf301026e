// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

/// One CHAP authentication attempt as presented by the engine.
///
/// Names are peer-controlled and kept as raw bytes; use
/// [`EscapedBytes`] to put them in a log line.
#[derive(Debug, Clone, Copy)]
pub struct ChapRequest<'a> {
    /// CHAP packet identifier.
    pub id: u8,
    /// Name the peer claims.
    pub peer_name: &'a [u8],
    /// Name this side authenticates as.
    pub our_name: &'a [u8],
    /// Challenge value sent to the peer.
    pub challenge: &'a [u8],
    /// Response value received from the peer.
    pub response: &'a [u8],
    /// The engine's `ipparam` string, if one is set.
    pub ipparam: Option<&'a str>,
}

impl<'a> ChapRequest<'a> {
    /// Creates a request without an `ipparam`.
    pub fn new(
        id: u8,
        peer_name: &'a [u8],
        our_name: &'a [u8],
        challenge: &'a [u8],
        response: &'a [u8],
    ) -> Self {
        Self {
            id,
            peer_name,
            our_name,
            challenge,
            response,
            ipparam: None,
        }
    }

    /// Attaches the engine's `ipparam` string.
    pub fn with_ipparam(mut self, ipparam: &'a str) -> Self {
        self.ipparam = Some(ipparam);
        self
    }

    /// Log-safe view of the peer name.
    pub fn peer(&self) -> EscapedBytes<'a> {
        EscapedBytes(self.peer_name)
    }
}

/// Displays attacker-controlled bytes with non-printables escaped.
#[derive(Clone, Copy)]
pub struct EscapedBytes<'a>(pub &'a [u8]);

impl fmt::Display for EscapedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for EscapedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}
