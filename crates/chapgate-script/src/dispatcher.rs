// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Name-based hook calls against the host's module.

use std::sync::Arc;

use crate::error::HookError;
use crate::hook::HookCall;
use crate::host::ForeignRuntimeHost;
use crate::runtime::Resolution;
use crate::value::TypedValue;

/// Resolves hooks on the loaded module and calls them.
///
/// The host lock is held from module lookup until the call returns.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    host: Arc<ForeignRuntimeHost>,
}

impl HookDispatcher {
    /// Dispatches through `host`.
    pub fn new(host: Arc<ForeignRuntimeHost>) -> Self {
        Self { host }
    }

    /// The underlying host.
    pub fn host(&self) -> &Arc<ForeignRuntimeHost> {
        &self.host
    }

    /// Calls `hook` with `args`.
    pub fn call(&self, hook: &str, args: &[TypedValue]) -> Result<TypedValue, HookError> {
        let mut session = self.host.enter();
        let module = session.load()?;

        let callable = match module.resolve(hook) {
            Resolution::Callable(callable) => callable,
            Resolution::NotCallable => {
                tracing::warn!(module = module.name(), hook, "hook is not callable");
                return Err(HookError::NotFound { hook: hook.into() });
            }
            Resolution::Missing => {
                tracing::warn!(module = module.name(), hook, "hook not found");
                return Err(HookError::NotFound { hook: hook.into() });
            }
        };

        tracing::debug!(module = module.name(), hook, args = args.len(), "calling hook");

        callable.call(args).map_err(|e| {
            tracing::warn!(module = module.name(), hook, "hook raised {e}");
            HookError::CallFailed {
                hook: hook.into(),
                reason: e.to_string(),
            }
        })
    }

    /// Calls the hook named by `call` with its fixed argument list.
    pub fn invoke(&self, call: &HookCall<'_>) -> Result<TypedValue, HookError> {
        self.call(call.hook_name(), &call.arguments())
    }
}
