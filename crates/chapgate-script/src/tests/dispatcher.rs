// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::{Arc, Mutex};

use chapgate_core::LifecycleEvent;

use crate::{
    ForeignException, ForeignModule, ForeignRuntimeHost, HookCall, HookDispatcher, HookError,
    LoadError, NativeModule, NativeRuntime, TypedValue,
};

fn dispatcher_for(module: Arc<NativeModule>) -> HookDispatcher {
    let name = module.name().to_owned();
    let runtime = NativeRuntime::new().with_module(module);

    HookDispatcher::new(Arc::new(ForeignRuntimeHost::new(runtime, Some(name))))
}

#[test]
fn test_call_returns_hook_result() {
    let module = Arc::new(
        NativeModule::new("policy").hook("answer", |_| Ok(TypedValue::Int(42))),
    );
    let dispatcher = dispatcher_for(module.clone());

    let value = dispatcher.call("answer", &[]).expect("Failed to call(..)");

    assert_eq!(value, TypedValue::Int(42));
    assert_eq!(module.calls(), 1);
}

#[test]
fn test_call_passes_arguments() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let module = Arc::new(NativeModule::new("policy").hook("record", move |args| {
        sink.lock().expect("Failed to lock()").extend_from_slice(args);
        Ok(TypedValue::None)
    }));
    let dispatcher = dispatcher_for(module);

    dispatcher
        .call("record", &[TypedValue::Int(1), TypedValue::str("two")])
        .expect("Failed to call(..)");

    assert_eq!(
        *seen.lock().expect("Failed to lock()"),
        vec![TypedValue::Int(1), TypedValue::str("two")]
    );
}

#[test]
fn test_missing_hook_is_not_found() {
    let module = Arc::new(NativeModule::new("policy"));
    let dispatcher = dispatcher_for(module.clone());

    let err = dispatcher
        .call("allowed_address_hook", &[TypedValue::Int(1)])
        .expect_err("Expected call(..) to fail");

    assert_eq!(
        err,
        HookError::NotFound {
            hook: "allowed_address_hook".into()
        }
    );
    assert_eq!(module.lookups(), 1);
    assert_eq!(module.calls(), 0);
}

#[test]
fn test_non_callable_hook_is_not_found() {
    let module = Arc::new(NativeModule::new("policy").attribute("chap_check_hook"));
    let dispatcher = dispatcher_for(module.clone());

    let err = dispatcher
        .invoke(&HookCall::ChapCheck)
        .expect_err("Expected invoke(..) to fail");

    assert!(matches!(err, HookError::NotFound { .. }));
    assert_eq!(module.calls(), 0);
}

#[test]
fn test_raising_hook_is_call_failed() {
    let module = Arc::new(NativeModule::new("policy").hook("ip_up_notifier", |_| {
        Err(ForeignException::new("ValueError", "bad arg"))
    }));
    let dispatcher = dispatcher_for(module);

    let err = dispatcher
        .invoke(&HookCall::Notifier {
            event: LifecycleEvent::IpUp,
            arg: 3,
        })
        .expect_err("Expected invoke(..) to fail");

    assert_eq!(
        err,
        HookError::CallFailed {
            hook: "ip_up_notifier".into(),
            reason: "ValueError: bad arg".into(),
        }
    );
}

#[test]
fn test_unavailable_module() {
    let runtime = NativeRuntime::new();
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("absent".into()));
    let dispatcher = HookDispatcher::new(Arc::new(host));

    for _ in 0..3 {
        let err = dispatcher
            .invoke(&HookCall::ChapCheck)
            .expect_err("Expected invoke(..) to fail");
        assert!(matches!(
            err,
            HookError::ModuleUnavailable(LoadError::Import { .. })
        ));
    }

    assert_eq!(stats.imports(), 1);
}

#[test]
fn test_invoke_uses_fixed_argument_list() {
    let module = Arc::new(NativeModule::new("policy").hook("allowed_address_hook", |args| {
        Ok(TypedValue::Bool(
            args == [TypedValue::Int(0x0A00_0002)].as_slice(),
        ))
    }));
    let dispatcher = dispatcher_for(module);

    let value = dispatcher
        .invoke(&HookCall::AllowedAddress { addr: 0x0A00_0002 })
        .expect("Failed to invoke(..)");

    assert_eq!(value, TypedValue::Bool(true));
}
