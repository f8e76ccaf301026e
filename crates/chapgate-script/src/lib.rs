// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CHAP backend whose decisions come from hooks in a loaded script module.
//!
//! A module is loaded once into a foreign runtime and its well-known hook
//! functions are called by name:
//!
//! | Hook                   | Arguments                  | Expected result     |
//! |------------------------|----------------------------|---------------------|
//! | `chap_check_hook`      | none                       | `bool`              |
//! | `chap_verify_hook`     | `name`, `ourname`, `ipparam` | secret as `str`   |
//! | `ip_choose_hook`       | none                       | `int` address or `None` |
//! | `allowed_address_hook` | `addr` as `int`            | `bool`              |
//! | `*_notifier`           | `arg` as `int`             | ignored             |
//!
//! Addresses cross the boundary as host-order integers of the dotted quad,
//! so `10.0.0.1` is `0x0A00_0001`.
//!
//! # Layers
//!
//! - [`ForeignRuntime`]: the interpreter seam (Python behind the `python`
//!   feature, Rust closures via [`NativeRuntime`])
//! - [`ForeignRuntimeHost`]: initializes the runtime once, caches the module
//!   and serializes every access behind one lock
//! - [`HookDispatcher`]: resolves and calls hooks, turning foreign failures
//!   into [`HookError`]
//! - [`InterpreterBackendAdapter`]: maps hook results onto the
//!   [`BackendAdapter`](chapgate_core::BackendAdapter) contract
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chapgate_core::BackendAdapter;
//! use chapgate_script::{
//!     ForeignRuntimeHost, HookDispatcher, InterpreterBackendAdapter, NativeModule,
//!     NativeRuntime, TypedValue,
//! };
//!
//! let module = NativeModule::new("policy").hook("chap_check_hook", |_| Ok(TypedValue::Bool(true)));
//! let runtime = NativeRuntime::new().with_module(module);
//! let host = ForeignRuntimeHost::new(runtime, Some("policy".into()));
//!
//! let mut adapter = InterpreterBackendAdapter::new(HookDispatcher::new(Arc::new(host)));
//!
//! assert!(adapter.supports_check());
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod adapter;
mod dispatcher;
mod error;
mod hook;
mod host;
mod native;
mod runtime;
mod value;

#[cfg(feature = "python")]
mod python;

pub use adapter::InterpreterBackendAdapter;
pub use dispatcher::HookDispatcher;
pub use error::{HookError, LoadError};
pub use hook::HookCall;
pub use host::{ForeignRuntimeHost, HostSession, ModuleHandle};
pub use native::{NativeModule, NativeRuntime, RuntimeStats};
pub use runtime::{ForeignCallable, ForeignException, ForeignModule, ForeignRuntime, Resolution};
pub use value::TypedValue;

#[cfg(feature = "python")]
pub use python::PythonRuntime;
