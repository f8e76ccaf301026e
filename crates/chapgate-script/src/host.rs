// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Process-wide owner of the foreign runtime and its one loaded module.
//!
//! # Lifecycle
//!
//! ```text
//!  Uninitialized --load--> Ready --shutdown--> ShutDown
//!        |                                        ^
//!        +-------------------shutdown-------------+
//! ```
//!
//! The runtime is initialized lazily by the first [`HostSession::load`].
//! The module cache then holds either the loaded module or the load error;
//! both are kept until [`HostSession::reconfigure`] names a module again.
//! Shutdown releases the module and finalizes the runtime exactly once.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LoadError;
use crate::runtime::{ForeignModule, ForeignRuntime, Resolution};

/// Shared handle to the loaded module.
#[derive(Clone)]
pub struct ModuleHandle(Arc<dyn ForeignModule>);

impl ModuleHandle {
    /// Name the module was imported under.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Looks up attribute `attr` on the module.
    pub fn resolve(&self, attr: &str) -> Resolution {
        self.0.resolve(attr)
    }
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModuleHandle").field(&self.0.name()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
    ShutDown,
}

enum ModuleCache {
    Empty,
    Loaded(ModuleHandle),
    Unavailable(LoadError),
}

struct HostState {
    runtime: Box<dyn ForeignRuntime>,
    phase: Phase,
    module_name: Option<String>,
    cache: ModuleCache,
}

impl HostState {
    fn shutdown(&mut self) {
        if self.phase == Phase::ShutDown {
            return;
        }

        self.cache = ModuleCache::Empty;

        if self.phase == Phase::Ready {
            self.runtime.finalize();
            tracing::info!(runtime = self.runtime.name(), "script runtime finalized");
        }

        self.phase = Phase::ShutDown;
    }
}

/// Owns the runtime and caches the configured module.
///
/// Every access goes through [`enter`](Self::enter), which holds one coarse
/// lock for the lifetime of the returned session.
pub struct ForeignRuntimeHost {
    state: Mutex<HostState>,
}

impl ForeignRuntimeHost {
    /// Wraps `runtime`, to load `module_name` on first use.
    pub fn new<R>(runtime: R, module_name: Option<String>) -> Self
    where
        R: ForeignRuntime + 'static,
    {
        Self {
            state: Mutex::new(HostState {
                runtime: Box::new(runtime),
                phase: Phase::Uninitialized,
                module_name,
                cache: ModuleCache::Empty,
            }),
        }
    }

    /// Takes the host lock.
    ///
    /// A panic inside an earlier session does not poison the host; the
    /// state it protects is only ever replaced whole.
    pub fn enter(&self) -> HostSession<'_> {
        HostSession {
            state: self.state.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Releases the module and finalizes the runtime. Idempotent.
    pub fn shutdown(&self) {
        self.enter().state.shutdown();
    }
}

impl fmt::Debug for ForeignRuntimeHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignRuntimeHost").finish_non_exhaustive()
    }
}

impl Drop for ForeignRuntimeHost {
    fn drop(&mut self) {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .shutdown();
    }
}

/// Exclusive access to the host for the duration of one operation.
pub struct HostSession<'a> {
    state: MutexGuard<'a, HostState>,
}

impl HostSession<'_> {
    /// Returns the module, importing it on first use.
    ///
    /// A failed import is cached: later calls return the same error without
    /// touching the runtime again.
    pub fn load(&mut self) -> Result<ModuleHandle, LoadError> {
        let state = &mut *self.state;

        if state.phase == Phase::ShutDown {
            return Err(LoadError::ShutDown);
        }

        match &state.cache {
            ModuleCache::Loaded(handle) => return Ok(handle.clone()),
            ModuleCache::Unavailable(error) => return Err(error.clone()),
            ModuleCache::Empty => {}
        }

        let Some(module) = state.module_name.clone() else {
            return Err(LoadError::NotConfigured);
        };

        if state.phase == Phase::Uninitialized {
            if let Err(e) = state.runtime.initialize() {
                let error = LoadError::Initialize {
                    runtime: state.runtime.name(),
                    reason: e.to_string(),
                };
                tracing::warn!("{error}");
                state.cache = ModuleCache::Unavailable(error.clone());
                return Err(error);
            }

            state.phase = Phase::Ready;
            tracing::info!(runtime = state.runtime.name(), "script runtime initialized");
        }

        match state.runtime.import(&module) {
            Ok(loaded) => {
                let handle = ModuleHandle(loaded);
                tracing::info!(module = %module, "script module loaded");
                state.cache = ModuleCache::Loaded(handle.clone());
                Ok(handle)
            }
            Err(e) => {
                let error = LoadError::Import {
                    module,
                    reason: e.to_string(),
                };
                tracing::warn!("{error}");
                state.cache = ModuleCache::Unavailable(error.clone());
                Err(error)
            }
        }
    }

    /// Names a new module and clears the cache, allowing a fresh import.
    pub fn reconfigure(&mut self, module_name: Option<String>) {
        self.state.module_name = module_name;
        self.state.cache = ModuleCache::Empty;
    }

    /// Configured module name.
    pub fn module_name(&self) -> Option<&str> {
        self.state.module_name.as_deref()
    }

    /// `true` once the module has been imported successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state.cache, ModuleCache::Loaded(_))
    }

    /// `true` after [`ForeignRuntimeHost::shutdown`].
    pub fn is_shut_down(&self) -> bool {
        self.state.phase == Phase::ShutDown
    }
}
