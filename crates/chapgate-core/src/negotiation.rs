// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::net::Ipv4Addr;
use std::sync::RwLock;

/// The engine's record of what it already offered the peer.
pub trait NegotiationState: Send + Sync {
    /// Address this side committed to offering the peer, if any.
    fn wanted_peer_address(&self) -> Option<Ipv4Addr>;
}

/// Shared, updatable wanted-options record.
///
/// Engines that do not keep their own negotiation state can update this
/// from their IPCP layer and hand an `Arc` of it to the adapters.
#[derive(Debug, Default)]
pub struct WantedOptions {
    peer_address: RwLock<Option<Ipv4Addr>>,
}

impl WantedOptions {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record with the peer address already set.
    pub fn with_peer_address(address: Ipv4Addr) -> Self {
        Self {
            peer_address: RwLock::new(Some(address)),
        }
    }

    /// Records the address offered to the peer.
    pub fn set_peer_address(&self, address: Option<Ipv4Addr>) {
        match self.peer_address.write() {
            Ok(mut slot) => *slot = address,
            Err(poisoned) => *poisoned.into_inner() = address,
        }
    }
}

impl NegotiationState for WantedOptions {
    fn wanted_peer_address(&self) -> Option<Ipv4Addr> {
        match self.peer_address.read() {
            Ok(slot) => *slot,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
