// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Typed calls to the well-known hooks.

use chapgate_core::LifecycleEvent;

use crate::value::TypedValue;

/// One hook invocation with its fixed argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCall<'a> {
    /// `chap_check_hook()`
    ChapCheck,
    /// `chap_verify_hook(name, ourname, ipparam)`
    ChapVerify {
        /// Peer name.
        name: &'a [u8],
        /// Local name.
        ourname: &'a [u8],
        /// The engine's `ipparam`, empty if unset.
        ipparam: &'a str,
    },
    /// `ip_choose_hook()`
    IpChoose,
    /// `allowed_address_hook(addr)`
    AllowedAddress {
        /// Candidate address in host order.
        addr: u32,
    },
    /// `<event>_notifier(arg)`
    Notifier {
        /// Which notifier.
        event: LifecycleEvent,
        /// Event argument.
        arg: i32,
    },
}

impl HookCall<'_> {
    /// Name of the hook this call targets.
    pub fn hook_name(&self) -> &'static str {
        match self {
            Self::ChapCheck => "chap_check_hook",
            Self::ChapVerify { .. } => "chap_verify_hook",
            Self::IpChoose => "ip_choose_hook",
            Self::AllowedAddress { .. } => "allowed_address_hook",
            Self::Notifier { event, .. } => event.hook_name(),
        }
    }

    /// Positional arguments for the call.
    ///
    /// Names are passed as text; bytes that are not valid UTF-8 are replaced.
    pub fn arguments(&self) -> Vec<TypedValue> {
        match *self {
            Self::ChapCheck | Self::IpChoose => Vec::new(),
            Self::ChapVerify {
                name,
                ourname,
                ipparam,
            } => vec![
                TypedValue::str(String::from_utf8_lossy(name)),
                TypedValue::str(String::from_utf8_lossy(ourname)),
                TypedValue::str(ipparam),
            ],
            Self::AllowedAddress { addr } => vec![TypedValue::from(addr)],
            Self::Notifier { arg, .. } => vec![TypedValue::from(arg)],
        }
    }
}
