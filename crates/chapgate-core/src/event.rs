// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

/// Link lifecycle notifications forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Network layer came up on the link.
    IpUp,
    /// Network layer went down.
    IpDown,
    /// Peer authenticated successfully; the link is up.
    AuthUp,
    /// The link went down.
    LinkDown,
}

impl LifecycleEvent {
    /// Every event, in registration order.
    pub const ALL: [Self; 4] = [Self::IpUp, Self::IpDown, Self::AuthUp, Self::LinkDown];

    /// Name of the notifier hook that receives this event.
    pub const fn hook_name(self) -> &'static str {
        match self {
            Self::IpUp => "ip_up_notifier",
            Self::IpDown => "ip_down_notifier",
            Self::AuthUp => "auth_up_notifier",
            Self::LinkDown => "link_down_notifier",
        }
    }

    /// Parses a notifier hook name.
    pub fn from_hook_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.hook_name() == name)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}
