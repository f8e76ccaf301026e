// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for chapgate.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A plugin option name this crate does not know.
    #[error("unknown option {0}")]
    UnknownOption(String),

    /// Both a backend command and a script module are configured.
    #[error("backend_command and pybackend_module_name are mutually exclusive")]
    ConflictingBackends,

    /// The backend command is not an absolute path.
    #[error("backend_command must be an absolute path, got {}", .0.display())]
    RelativeCommand(PathBuf),

    /// The script module name is empty.
    #[error("pybackend_module_name must not be empty")]
    EmptyModuleName,

    /// A script module is configured but no runtime can load it.
    #[error("no script runtime available to load module {0}")]
    NoScriptRuntime(String),
}

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}
