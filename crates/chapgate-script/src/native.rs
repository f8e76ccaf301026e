// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! In-process runtime whose modules are tables of Rust closures.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::runtime::{
    ForeignCallable, ForeignException, ForeignModule, ForeignRuntime, Resolution,
};
use crate::value::TypedValue;

type HookFn = dyn Fn(&[TypedValue]) -> Result<TypedValue, ForeignException> + Send + Sync;

enum Attribute {
    Hook(Arc<HookFn>),
    Value,
}

/// A module of named hooks.
///
/// Counts attribute lookups and calls so callers can observe how the
/// dispatcher used it.
pub struct NativeModule {
    name: String,
    attributes: HashMap<String, Attribute>,
    lookups: AtomicUsize,
    calls: Arc<AtomicUsize>,
}

impl NativeModule {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            lookups: AtomicUsize::new(0),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Adds a callable hook.
    pub fn hook<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[TypedValue]) -> Result<TypedValue, ForeignException> + Send + Sync + 'static,
    {
        self.attributes.insert(name.into(), Attribute::Hook(Arc::new(f)));
        self
    }

    /// Adds a plain, non-callable attribute.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Attribute::Value);
        self
    }

    /// Number of attribute lookups so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of hook calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for NativeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.attributes.keys().collect();
        names.sort();

        f.debug_struct("NativeModule")
            .field("name", &self.name)
            .field("attributes", &names)
            .finish()
    }
}

impl ForeignModule for NativeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, attr: &str) -> Resolution {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        match self.attributes.get(attr) {
            Some(Attribute::Hook(f)) => Resolution::Callable(Box::new(NativeCallable {
                f: Arc::clone(f),
                calls: Arc::clone(&self.calls),
            })),
            Some(Attribute::Value) => Resolution::NotCallable,
            None => Resolution::Missing,
        }
    }
}

struct NativeCallable {
    f: Arc<HookFn>,
    calls: Arc<AtomicUsize>,
}

impl ForeignCallable for NativeCallable {
    fn call(&self, args: &[TypedValue]) -> Result<TypedValue, ForeignException> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.f)(args)
    }
}

/// Lifecycle counters of a [`NativeRuntime`], readable after the runtime
/// has moved into a host.
#[derive(Debug, Clone, Default)]
pub struct RuntimeStats {
    inner: Arc<StatsInner>,
}

#[derive(Debug, Default)]
struct StatsInner {
    initializations: AtomicUsize,
    imports: AtomicUsize,
    finalizations: AtomicUsize,
}

impl RuntimeStats {
    /// Times the runtime was initialized.
    pub fn initializations(&self) -> usize {
        self.inner.initializations.load(Ordering::Relaxed)
    }

    /// Import attempts, successful or not.
    pub fn imports(&self) -> usize {
        self.inner.imports.load(Ordering::Relaxed)
    }

    /// Times the runtime was finalized.
    pub fn finalizations(&self) -> usize {
        self.inner.finalizations.load(Ordering::Relaxed)
    }
}

/// Runtime hosting [`NativeModule`]s.
#[derive(Debug, Default)]
pub struct NativeRuntime {
    modules: HashMap<String, Arc<NativeModule>>,
    fail_initialize: bool,
    stats: RuntimeStats,
}

impl NativeRuntime {
    /// Creates a runtime with no modules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `module` importable under its name.
    pub fn with_module(mut self, module: impl Into<Arc<NativeModule>>) -> Self {
        let module = module.into();
        self.modules.insert(module.name.clone(), module);
        self
    }

    /// Makes [`initialize`](ForeignRuntime::initialize) fail.
    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    /// Shared lifecycle counters.
    pub fn stats(&self) -> RuntimeStats {
        self.stats.clone()
    }
}

impl ForeignRuntime for NativeRuntime {
    fn name(&self) -> &'static str {
        "native"
    }

    fn initialize(&mut self) -> Result<(), ForeignException> {
        self.stats.inner.initializations.fetch_add(1, Ordering::Relaxed);

        if self.fail_initialize {
            return Err(ForeignException::new("RuntimeError", "initialization refused"));
        }

        Ok(())
    }

    fn import(&mut self, module: &str) -> Result<Arc<dyn ForeignModule>, ForeignException> {
        self.stats.inner.imports.fetch_add(1, Ordering::Relaxed);

        match self.modules.get(module) {
            Some(found) => Ok(Arc::clone(found) as Arc<dyn ForeignModule>),
            None => Err(ForeignException::new(
                "ModuleNotFoundError",
                format!("No module named '{module}'"),
            )),
        }
    }

    fn finalize(&mut self) {
        self.stats.inner.finalizations.fetch_add(1, Ordering::Relaxed);
    }
}
