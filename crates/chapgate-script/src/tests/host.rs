// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;
use std::thread;

use crate::{ForeignRuntimeHost, LoadError, NativeModule, NativeRuntime, Resolution};

fn runtime_with(name: &str) -> NativeRuntime {
    NativeRuntime::new().with_module(NativeModule::new(name).attribute("VERSION"))
}

// =============================================================================
// load
// =============================================================================

#[test]
fn test_load_initializes_once_and_caches() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));

    let first = host.enter().load().expect("Failed to load()");
    let second = host.enter().load().expect("Failed to load()");

    assert_eq!(first.name(), "policy");
    assert_eq!(second.name(), "policy");
    assert_eq!(stats.initializations(), 1);
    assert_eq!(stats.imports(), 1);
    assert!(host.enter().is_loaded());
}

#[test]
fn test_load_failure_is_cached() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("missing".into()));

    let first = host.enter().load().expect_err("Expected load() to fail");
    let second = host.enter().load().expect_err("Expected load() to fail");

    assert!(matches!(first, LoadError::Import { ref module, .. } if module == "missing"));
    assert_eq!(first, second);
    assert_eq!(stats.imports(), 1);
    assert!(!host.enter().is_loaded());
}

#[test]
fn test_load_without_module_name() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, None);

    assert_eq!(host.enter().load().map(|_| ()), Err(LoadError::NotConfigured));
    assert_eq!(stats.initializations(), 0);
    assert_eq!(host.enter().module_name(), None);
}

#[test]
fn test_initialize_failure_reported() {
    let runtime = runtime_with("policy").failing_initialize();
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));

    let err = host.enter().load().expect_err("Expected load() to fail");
    let again = host.enter().load().expect_err("Expected load() to fail");

    assert!(matches!(err, LoadError::Initialize { runtime: "native", .. }));
    assert_eq!(err, again);
    assert_eq!(stats.initializations(), 1);
    assert_eq!(stats.imports(), 0);
}

#[test]
fn test_reconfigure_allows_new_import() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("typo".into()));

    assert!(host.enter().load().is_err());

    {
        let mut session = host.enter();
        session.reconfigure(Some("policy".into()));
        assert_eq!(session.module_name(), Some("policy"));
    }

    let module = host.enter().load().expect("Failed to load()");

    assert_eq!(module.name(), "policy");
    assert_eq!(stats.imports(), 2);
    assert_eq!(stats.initializations(), 1);
}

#[test]
fn test_resolve_through_handle() {
    let host = ForeignRuntimeHost::new(runtime_with("policy"), Some("policy".into()));
    let module = host.enter().load().expect("Failed to load()");

    assert!(matches!(module.resolve("VERSION"), Resolution::NotCallable));
    assert!(matches!(module.resolve("nope"), Resolution::Missing));
}

#[test]
fn test_concurrent_load_imports_once() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = Arc::new(ForeignRuntimeHost::new(runtime, Some("policy".into())));

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let host = Arc::clone(&host);
            thread::spawn(move || host.enter().load().is_ok())
        })
        .collect();

    for worker in workers {
        assert!(worker.join().expect("Failed to join()"));
    }

    assert_eq!(stats.imports(), 1);
}

// =============================================================================
// shutdown
// =============================================================================

#[test]
fn test_shutdown_finalizes_once() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));
    host.enter().load().expect("Failed to load()");

    host.shutdown();
    host.shutdown();
    drop(host);

    assert_eq!(stats.finalizations(), 1);
}

#[test]
fn test_drop_finalizes_initialized_runtime() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));
    host.enter().load().expect("Failed to load()");

    drop(host);

    assert_eq!(stats.finalizations(), 1);
}

#[test]
fn test_shutdown_without_initialize_skips_finalize() {
    let runtime = runtime_with("policy");
    let stats = runtime.stats();
    let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));

    host.shutdown();

    assert_eq!(stats.finalizations(), 0);
    assert!(host.enter().is_shut_down());
}

#[test]
fn test_load_after_shutdown() {
    let host = ForeignRuntimeHost::new(runtime_with("policy"), Some("policy".into()));
    host.enter().load().expect("Failed to load()");

    host.shutdown();

    assert_eq!(host.enter().load().map(|_| ()), Err(LoadError::ShutDown));
}
