// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Contract between a CHAP authentication engine and its decision backends.
//!
//! The engine owns the protocol: it negotiates the link, generates the
//! challenge and knows how to check a response against a secret. What it
//! does not know is the secret itself, or whether an address is acceptable.
//! A [`BackendAdapter`] answers those questions from outside the engine,
//! either by running an external program or by calling hooks in an embedded
//! interpreter.
//!
//! # Types
//!
//! - [`BackendAdapter`]: the uniform contract every strategy implements
//! - [`ChapRequest`]: one authentication attempt as presented by the engine
//! - [`DigestCapability`]: the engine's response checker, consumed as-is
//! - [`NegotiationState`]: the engine's view of what it offered the peer
//! - [`Verification`] / [`VerifyOutcome`]: the tri-state decision handed back
//! - [`BackendFailure`]: internal failure taxonomy, never crosses the contract
//!
//! # Example
//!
//! ```rust
//! use std::net::Ipv4Addr;
//!
//! use chapgate_core::{
//!     BackendAdapter, ChapRequest, DigestCapability, LifecycleEvent, Verification,
//! };
//!
//! struct DenyAll;
//!
//! impl BackendAdapter for DenyAll {
//!     fn name(&self) -> &'static str {
//!         "deny-all"
//!     }
//!
//!     fn supports_check(&mut self) -> bool {
//!         true
//!     }
//!
//!     fn verify(&mut self, _: &ChapRequest<'_>, _: &dyn DigestCapability) -> Verification {
//!         Verification::rejected()
//!     }
//!
//!     fn allowed_address(&mut self, _: Ipv4Addr) -> bool {
//!         false
//!     }
//!
//!     fn choose_address(&mut self, _: Ipv4Addr) -> Option<Ipv4Addr> {
//!         None
//!     }
//!
//!     fn notify(&mut self, _: LifecycleEvent, _: i32) {}
//! }
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod adapter;
mod digest;
mod event;
mod failure;
mod negotiation;
mod outcome;
mod request;

pub use adapter::BackendAdapter;
pub use digest::{DigestCapability, DigestKind, DigestMask};
pub use event::LifecycleEvent;
pub use failure::BackendFailure;
pub use negotiation::{NegotiationState, WantedOptions};
pub use outcome::{MESSAGE_SPACE, ResponseMessage, Verification, VerifyOutcome};
pub use request::{ChapRequest, EscapedBytes};
