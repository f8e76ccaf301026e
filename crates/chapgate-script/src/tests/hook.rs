// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use chapgate_core::LifecycleEvent;

use crate::{HookCall, TypedValue};

#[test]
fn test_hook_names() {
    assert_eq!(HookCall::ChapCheck.hook_name(), "chap_check_hook");
    assert_eq!(HookCall::IpChoose.hook_name(), "ip_choose_hook");
    assert_eq!(
        HookCall::AllowedAddress { addr: 0 }.hook_name(),
        "allowed_address_hook"
    );
    assert_eq!(
        HookCall::ChapVerify {
            name: b"",
            ourname: b"",
            ipparam: "",
        }
        .hook_name(),
        "chap_verify_hook"
    );

    for event in LifecycleEvent::ALL {
        assert_eq!(
            HookCall::Notifier { event, arg: 0 }.hook_name(),
            event.hook_name()
        );
    }
}

#[test]
fn test_argument_lists() {
    assert!(HookCall::ChapCheck.arguments().is_empty());
    assert!(HookCall::IpChoose.arguments().is_empty());

    assert_eq!(
        HookCall::AllowedAddress { addr: 0x0A00_0001 }.arguments(),
        vec![TypedValue::Int(0x0A00_0001)]
    );
    assert_eq!(
        HookCall::Notifier {
            event: LifecycleEvent::LinkDown,
            arg: -1,
        }
        .arguments(),
        vec![TypedValue::Int(-1)]
    );
}

#[test]
fn test_verify_arguments_in_order() {
    let args = HookCall::ChapVerify {
        name: b"alice",
        ourname: b"gateway",
        ipparam: "dsl0",
    }
    .arguments();

    assert_eq!(
        args,
        vec![
            TypedValue::str("alice"),
            TypedValue::str("gateway"),
            TypedValue::str("dsl0"),
        ]
    );
}

#[test]
fn test_verify_arguments_replace_invalid_utf8() {
    let args = HookCall::ChapVerify {
        name: b"al\xffce",
        ourname: b"gw",
        ipparam: "",
    }
    .arguments();

    assert_eq!(args[0], TypedValue::str("al\u{fffd}ce"));
    assert_eq!(args[2], TypedValue::str(""));
}
