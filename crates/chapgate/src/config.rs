// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Plugin configuration.
//!
//! Loaded from TOML, or assembled from the engine's `name value` plugin
//! options via [`ChapgateConfig::from_options`].
//!
//! ```toml
//! backend_command = "/usr/local/libexec/chap-secret"
//! enabled_digest = "ms-chap-v2"
//! backend_timeout_ms = 5000
//!
//! [logging]
//! level = "chapgate=debug"
//! ansi = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chapgate_core::DigestKind;
use chapgate_process::ProcessConfig;
use serde::Deserialize;

use crate::error::ConfigError;

/// Log subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Colored output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            ansi: true,
        }
    }
}

/// Full plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChapgateConfig {
    /// Absolute path of the external secret program.
    pub backend_command: Option<PathBuf>,
    /// Script module whose hooks answer instead.
    pub pybackend_module_name: Option<String>,
    /// Directories searched for the script module, before the defaults.
    pub script_paths: Vec<PathBuf>,
    /// The one digest the engine may use.
    pub enabled_digest: DigestKind,
    /// Bound for one backend exchange; unset blocks indefinitely.
    pub backend_timeout_ms: Option<u64>,
    /// Answer when the address hook gives none.
    pub allow_address_by_default: bool,
    /// Passed to `chap_verify_hook` when the engine supplies none.
    pub ipparam: Option<String>,
    /// Log subscriber settings.
    pub logging: LoggingConfig,
}

impl Default for ChapgateConfig {
    fn default() -> Self {
        Self {
            backend_command: None,
            pybackend_module_name: None,
            script_paths: Vec::new(),
            enabled_digest: DigestKind::MsChapV2,
            backend_timeout_ms: None,
            allow_address_by_default: false,
            ipparam: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ChapgateConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Applies one engine plugin option.
    ///
    /// Known names are `backend_command` and `pybackend_module_name`.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "backend_command" => self.backend_command = Some(PathBuf::from(value)),
            "pybackend_module_name" => self.pybackend_module_name = Some(value.to_owned()),
            other => return Err(ConfigError::UnknownOption(other.to_owned())),
        }

        Ok(())
    }

    /// Builds a validated configuration from engine plugin options.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in options {
            config.apply_option(name.as_ref(), value.as_ref())?;
        }
        config.validate()?;

        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_command.is_some() && self.pybackend_module_name.is_some() {
            return Err(ConfigError::ConflictingBackends);
        }

        if let Some(command) = &self.backend_command {
            if !command.is_absolute() {
                return Err(ConfigError::RelativeCommand(command.clone()));
            }
        }

        if self.pybackend_module_name.as_deref() == Some("") {
            return Err(ConfigError::EmptyModuleName);
        }

        Ok(())
    }

    /// Backend timeout as a [`Duration`].
    pub fn backend_timeout(&self) -> Option<Duration> {
        self.backend_timeout_ms.map(Duration::from_millis)
    }

    /// Settings for the process backend, if a command is configured.
    pub fn process_config(&self) -> Option<ProcessConfig> {
        let command = self.backend_command.as_ref()?;
        let config = ProcessConfig::new(command);

        Some(match self.backend_timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    }
}
