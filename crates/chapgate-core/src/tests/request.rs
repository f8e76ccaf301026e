// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{ChapRequest, EscapedBytes};

#[test]
fn test_new_has_no_ipparam() {
    let request = ChapRequest::new(1, b"alice", b"server", b"chal", b"resp");

    assert_eq!(request.ipparam, None);
    assert_eq!(request.with_ipparam("vpn0").ipparam, Some("vpn0"));
}

#[test]
fn test_peer_escapes_control_characters() {
    let request = ChapRequest::new(1, b"bob\n\x1b[31m", b"server", b"", b"");

    assert_eq!(request.peer().to_string(), "bob\\n\\x1b[31m");
}

#[test]
fn test_escaped_debug_is_quoted() {
    assert_eq!(format!("{:?}", EscapedBytes(b"alice")), "\"alice\"");
}
