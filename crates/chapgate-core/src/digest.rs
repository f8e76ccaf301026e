// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CHAP digest variants and the engine's response checker.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign};

use serde::{Deserialize, Serialize};

use crate::outcome::ResponseMessage;

/// CHAP digest variants an engine can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestKind {
    /// RFC 1994 MD5.
    Md5,
    /// Microsoft CHAP (RFC 2433).
    MsChap,
    /// Microsoft CHAP version 2 (RFC 2759).
    MsChapV2,
}

impl DigestKind {
    /// Every known variant.
    pub const ALL: [Self; 3] = [Self::MsChapV2, Self::MsChap, Self::Md5];

    /// Bit of this variant in a [`DigestMask`].
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Self::MsChapV2 => 0x01,
            Self::MsChap => 0x02,
            Self::Md5 => 0x04,
        }
    }

    /// Conventional protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::MsChap => "MS-CHAP",
            Self::MsChapV2 => "MS-CHAPv2",
        }
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of digest variants the engine may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestMask(u8);

impl DigestMask {
    /// No variant enabled.
    pub const NONE: Self = Self(0);

    /// Every variant enabled; the engine's default before restriction.
    pub const ALL: Self = Self(0x07);

    /// Mask holding only `kind`.
    #[inline]
    pub const fn only(kind: DigestKind) -> Self {
        Self(kind.bit())
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if `kind` is enabled.
    #[inline]
    pub const fn contains(self, kind: DigestKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if no variant is enabled.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Keeps `kind` enabled if it already was, disabling everything else.
    #[inline]
    pub const fn restrict_to(self, kind: DigestKind) -> Self {
        Self(self.0 & kind.bit())
    }

    /// Enabled variants, strongest first.
    pub fn kinds(self) -> impl Iterator<Item = DigestKind> {
        DigestKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for DigestMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitAnd for DigestMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for DigestMask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for DigestMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        let mut first = true;
        for kind in self.kinds() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(kind.name())?;
            first = false;
        }

        Ok(())
    }
}

/// The engine's algorithm-specific response checker.
///
/// Implemented outside this workspace by the authentication engine; adapters
/// call it with the secret they obtained and never inspect the algorithm.
pub trait DigestCapability {
    /// Variant this checker implements.
    fn kind(&self) -> DigestKind;

    /// Computes the expected response from `secret` and compares it with
    /// `response`. Writes a status text for the peer into `message`.
    fn verify_response(
        &self,
        id: u8,
        name: &[u8],
        secret: &[u8],
        challenge: &[u8],
        response: &[u8],
        message: &mut ResponseMessage,
    ) -> bool;
}
