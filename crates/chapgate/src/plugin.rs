// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The engine-facing entry point.

use core::fmt;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chapgate_core::{
    BackendAdapter, ChapRequest, DigestCapability, DigestMask, LifecycleEvent, NegotiationState,
    Verification, WantedOptions,
};
use chapgate_process::ProcessBackendAdapter;
use chapgate_script::{
    ForeignRuntime, ForeignRuntimeHost, HookDispatcher, InterpreterBackendAdapter,
};

use crate::config::ChapgateConfig;
use crate::error::ConfigError;

/// Configures and builds a [`Plugin`].
pub struct PluginBuilder {
    config: ChapgateConfig,
    negotiation: Option<Arc<dyn NegotiationState>>,
    runtime: Option<Box<dyn ForeignRuntime>>,
}

impl PluginBuilder {
    /// Engine state consulted by the process backend's address check.
    ///
    /// Defaults to an empty [`WantedOptions`].
    pub fn negotiation(mut self, negotiation: Arc<dyn NegotiationState>) -> Self {
        self.negotiation = Some(negotiation);
        self
    }

    /// Runtime the script module is loaded into.
    ///
    /// With the `python` feature the default is the embedded CPython;
    /// without it a runtime must be supplied whenever a module is configured.
    pub fn script_runtime(mut self, runtime: impl ForeignRuntime + 'static) -> Self {
        self.runtime = Some(Box::new(runtime));
        self
    }

    /// Validates the configuration and selects the backend.
    pub fn build(self) -> Result<Plugin, ConfigError> {
        let Self {
            config,
            negotiation,
            runtime,
        } = self;

        config.validate()?;

        let negotiation = negotiation.unwrap_or_else(|| Arc::new(WantedOptions::new()));

        let adapter: Box<dyn BackendAdapter> = match &config.pybackend_module_name {
            Some(module) => {
                let runtime = match runtime {
                    Some(runtime) => runtime,
                    None => default_runtime(&config, module)?,
                };

                let host = ForeignRuntimeHost::new(runtime, Some(module.clone()));
                let adapter = InterpreterBackendAdapter::new(HookDispatcher::new(Arc::new(host)))
                    .with_address_default(config.allow_address_by_default);

                Box::new(adapter)
            }
            None => Box::new(ProcessBackendAdapter::new(config.process_config(), negotiation)),
        };

        let digests = DigestMask::ALL.restrict_to(config.enabled_digest);

        tracing::info!(
            adapter = adapter.name(),
            digests = %digests,
            "chapgate plugin initialized"
        );

        Ok(Plugin {
            adapter: Mutex::new(adapter),
            digests,
            ipparam: config.ipparam,
        })
    }
}

#[cfg(feature = "python")]
fn default_runtime(
    config: &ChapgateConfig,
    _module: &str,
) -> Result<Box<dyn ForeignRuntime>, ConfigError> {
    let runtime =
        chapgate_script::PythonRuntime::new().with_script_paths(config.script_paths.iter().cloned());

    Ok(Box::new(runtime))
}

#[cfg(not(feature = "python"))]
fn default_runtime(
    _config: &ChapgateConfig,
    module: &str,
) -> Result<Box<dyn ForeignRuntime>, ConfigError> {
    Err(ConfigError::NoScriptRuntime(module.to_owned()))
}

/// The single registered backend, exposed through the engine's hook table.
pub struct Plugin {
    adapter: Mutex<Box<dyn BackendAdapter>>,
    digests: DigestMask,
    ipparam: Option<String>,
}

impl Plugin {
    /// Starts building a plugin from `config`.
    pub fn builder(config: ChapgateConfig) -> PluginBuilder {
        PluginBuilder {
            config,
            negotiation: None,
            runtime: None,
        }
    }

    fn adapter(&self) -> MutexGuard<'_, Box<dyn BackendAdapter>> {
        self.adapter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Name of the active backend.
    pub fn adapter_name(&self) -> &'static str {
        self.adapter().name()
    }

    /// Digests the engine may negotiate.
    pub fn enabled_digests(&self) -> DigestMask {
        self.digests
    }

    /// Whether the backend will check secrets.
    pub fn chap_check(&self) -> bool {
        self.adapter().supports_check()
    }

    /// Decides one attempt.
    ///
    /// Attempts using a digest outside [`enabled_digests`](Self::enabled_digests)
    /// are rejected without consulting the backend.
    pub fn chap_verify(
        &self,
        request: &ChapRequest<'_>,
        digest: &dyn DigestCapability,
    ) -> Verification {
        let kind = digest.kind();
        if !self.digests.contains(kind) {
            tracing::warn!(peer = %request.peer(), digest = %kind, "digest not enabled");
            return Verification::rejected();
        }

        let mut request = *request;
        if request.ipparam.is_none() {
            request.ipparam = self.ipparam.as_deref();
        }

        self.adapter().verify(&request, digest)
    }

    /// Whether the peer may use `candidate`.
    pub fn allowed_address(&self, candidate: Ipv4Addr) -> bool {
        self.adapter().allowed_address(candidate)
    }

    /// Lets the backend override the address proposed in `addr`.
    pub fn ip_choose(&self, addr: &mut Ipv4Addr) {
        if let Some(chosen) = self.adapter().choose_address(*addr) {
            tracing::debug!(from = %addr, to = %chosen, "backend chose peer address");
            *addr = chosen;
        }
    }

    /// Forwards a lifecycle notification.
    pub fn notify(&self, event: LifecycleEvent, arg: i32) {
        self.adapter().notify(event, arg);
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("digests", &self.digests)
            .finish_non_exhaustive()
    }
}
