// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Pluggable secret and policy backends for a CHAP authenticator.
//!
//! The authentication engine owns the protocol and the digest math. For
//! every attempt it asks a [`Plugin`] three kinds of question: is there a
//! secret checker at all, is this response right for this peer, and may the
//! peer use this address. The plugin forwards each question to exactly one
//! backend, picked from configuration:
//!
//! - `backend_command`: an external program prints the peer's secret
//!   ([`chapgate_process`])
//! - `pybackend_module_name`: hook functions in a script module answer
//!   ([`chapgate_script`], Python behind the `python` feature)
//!
//! ```rust,no_run
//! use chapgate::{ChapgateConfig, Plugin};
//!
//! let config = ChapgateConfig::from_toml_str(
//!     r#"
//!     backend_command = "/usr/local/libexec/chap-secret"
//!     enabled_digest = "md5"
//!     "#,
//! )?;
//!
//! chapgate::logging::init(&config.logging)?;
//! let plugin = Plugin::builder(config).build()?;
//!
//! assert!(plugin.chap_check());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Failure handling
//!
//! Backend failures never reach the engine as errors. They are logged and
//! folded into the decision, so a peer cannot tell a missing backend from a
//! crashed one or from a wrong secret.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod config;
mod error;
pub mod logging;
mod plugin;

pub use config::{ChapgateConfig, LoggingConfig};
pub use error::{ConfigError, LoggingError};
pub use plugin::{Plugin, PluginBuilder};

pub use chapgate_core::{
    BackendAdapter, ChapRequest, DigestCapability, DigestKind, DigestMask, LifecycleEvent,
    NegotiationState, ResponseMessage, Verification, VerifyOutcome, WantedOptions,
};
pub use chapgate_process::{ProcessBackendAdapter, ProcessConfig};
pub use chapgate_script::{
    ForeignRuntime, ForeignRuntimeHost, HookDispatcher, InterpreterBackendAdapter, NativeModule,
    NativeRuntime, TypedValue,
};
pub use chapgate_secret::{MAX_SECRET_LEN, SecretBuffer};

#[cfg(feature = "python")]
pub use chapgate_script::PythonRuntime;
