// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::LifecycleEvent;

#[test]
fn test_hook_names_round_trip() {
    for event in LifecycleEvent::ALL {
        assert_eq!(LifecycleEvent::from_hook_name(event.hook_name()), Some(event));
    }
}

#[test]
fn test_unknown_hook_name() {
    assert_eq!(LifecycleEvent::from_hook_name("phase_changed"), None);
}

#[test]
fn test_display_is_hook_name() {
    assert_eq!(LifecycleEvent::AuthUp.to_string(), "auth_up_notifier");
}
