// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for chapgate-script.
use thiserror::Error;

/// Why a module handle could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No module name is configured.
    #[error("no script module configured")]
    NotConfigured,

    /// The runtime failed to start.
    #[error("{runtime} runtime failed to initialize: {reason}")]
    Initialize {
        /// Runtime name.
        runtime: &'static str,
        /// Foreign error text.
        reason: String,
    },

    /// Importing the module failed. Cached until the host is reconfigured.
    #[error("failed to import module {module}: {reason}")]
    Import {
        /// Configured module name.
        module: String,
        /// Foreign error text.
        reason: String,
    },

    /// The runtime has been finalized.
    #[error("script runtime has been shut down")]
    ShutDown,
}

/// Errors from resolving or calling a hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The module has no callable attribute of that name.
    #[error("hook {hook} not found")]
    NotFound {
        /// Hook name.
        hook: String,
    },

    /// The module could not be loaded.
    #[error(transparent)]
    ModuleUnavailable(#[from] LoadError),

    /// The hook raised.
    #[error("hook {hook} failed: {reason}")]
    CallFailed {
        /// Hook name.
        hook: String,
        /// Foreign error text.
        reason: String,
    },

    /// The hook returned a value of the wrong type.
    #[error("expected {expected}, hook returned {found}")]
    TypeMismatch {
        /// Type the caller wanted.
        expected: &'static str,
        /// Type that came back.
        found: String,
    },
}
