// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Installs a global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::info!(level = %config.level, "logging initialized");

    Ok(())
}

/// Builds the filter `init` would install.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| LoggingError::Filter(e.to_string()))
}
