// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::{NegotiationState, WantedOptions};

#[test]
fn test_new_has_no_address() {
    let wanted = WantedOptions::new();

    assert_eq!(wanted.wanted_peer_address(), None);
}

#[test]
fn test_set_peer_address_is_visible_through_trait_object() {
    let wanted = Arc::new(WantedOptions::new());
    let state: Arc<dyn NegotiationState> = wanted.clone();

    wanted.set_peer_address(Some(Ipv4Addr::new(10, 0, 0, 2)));
    assert_eq!(state.wanted_peer_address(), Some(Ipv4Addr::new(10, 0, 0, 2)));

    wanted.set_peer_address(None);
    assert_eq!(state.wanted_peer_address(), None);
}

#[test]
fn test_with_peer_address() {
    let wanted = WantedOptions::with_peer_address(Ipv4Addr::new(192, 168, 1, 7));

    assert_eq!(wanted.wanted_peer_address(), Some(Ipv4Addr::new(192, 168, 1, 7)));
}
