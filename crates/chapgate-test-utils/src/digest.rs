// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::{Cell, RefCell};

use chapgate_core::{DigestCapability, DigestKind, ResponseMessage};
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// RFC 1994 MD5-CHAP: `response = MD5(id || secret || challenge)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Md5Chap;

impl Md5Chap {
    /// Computes the response a peer holding `secret` would send.
    pub fn response(id: u8, secret: &[u8], challenge: &[u8]) -> [u8; 16] {
        let mut hasher = Md5::new();
        hasher.update([id]);
        hasher.update(secret);
        hasher.update(challenge);

        let mut out = [0u8; 16];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

impl DigestCapability for Md5Chap {
    fn kind(&self) -> DigestKind {
        DigestKind::Md5
    }

    fn verify_response(
        &self,
        id: u8,
        _name: &[u8],
        secret: &[u8],
        challenge: &[u8],
        response: &[u8],
        message: &mut ResponseMessage,
    ) -> bool {
        let expected = Self::response(id, secret, challenge);
        let ok = response.len() == expected.len() && bool::from(expected[..].ct_eq(response));

        message.set(if ok { "Access granted" } else { "Access denied" });
        ok
    }
}

/// Wraps a digest and records how it was called.
#[derive(Debug, Default)]
pub struct RecordingDigest<D> {
    inner: D,
    calls: Cell<usize>,
    secret_lens: RefCell<Vec<usize>>,
}

impl<D: DigestCapability> RecordingDigest<D> {
    /// Wraps `inner`.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
            secret_lens: RefCell::new(Vec::new()),
        }
    }

    /// Number of `verify_response` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Length of the secret passed on each call.
    pub fn secret_lens(&self) -> Vec<usize> {
        self.secret_lens.borrow().clone()
    }
}

impl<D: DigestCapability> DigestCapability for RecordingDigest<D> {
    fn kind(&self) -> DigestKind {
        self.inner.kind()
    }

    fn verify_response(
        &self,
        id: u8,
        name: &[u8],
        secret: &[u8],
        challenge: &[u8],
        response: &[u8],
        message: &mut ResponseMessage,
    ) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.secret_lens.borrow_mut().push(secret.len());

        self.inner
            .verify_response(id, name, secret, challenge, response, message)
    }
}
