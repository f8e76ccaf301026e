// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chapgate_core::DigestKind;

use crate::{ChapgateConfig, ConfigError};

// =============================================================================
// TOML
// =============================================================================

#[test]
fn test_defaults() {
    let config = ChapgateConfig::from_toml_str("").expect("Failed to from_toml_str(..)");

    assert_eq!(config, ChapgateConfig::default());
    assert_eq!(config.enabled_digest, DigestKind::MsChapV2);
    assert!(!config.allow_address_by_default);
    assert_eq!(config.backend_timeout(), None);
    assert_eq!(config.process_config(), None);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_document() {
    let config = ChapgateConfig::from_toml_str(
        r#"
        backend_command = "/usr/libexec/chap-secret"
        enabled_digest = "md5"
        backend_timeout_ms = 2500
        allow_address_by_default = true
        ipparam = "dsl0"

        [logging]
        level = "chapgate=debug"
        ansi = false
        "#,
    )
    .expect("Failed to from_toml_str(..)");

    assert_eq!(
        config.backend_command,
        Some(PathBuf::from("/usr/libexec/chap-secret"))
    );
    assert_eq!(config.enabled_digest, DigestKind::Md5);
    assert_eq!(config.backend_timeout(), Some(Duration::from_millis(2500)));
    assert!(config.allow_address_by_default);
    assert_eq!(config.ipparam.as_deref(), Some("dsl0"));
    assert_eq!(config.logging.level, "chapgate=debug");
    assert!(!config.logging.ansi);

    let process = config.process_config().expect("Failed to process_config()");
    assert_eq!(process.program, PathBuf::from("/usr/libexec/chap-secret"));
    assert_eq!(process.timeout, Some(Duration::from_millis(2500)));
}

#[test]
fn test_script_document() {
    let config = ChapgateConfig::from_toml_str(
        r#"
        pybackend_module_name = "radius_policy"
        script_paths = ["/etc/chapgate/scripts"]
        "#,
    )
    .expect("Failed to from_toml_str(..)");

    assert_eq!(config.pybackend_module_name.as_deref(), Some("radius_policy"));
    assert_eq!(config.script_paths, vec![PathBuf::from("/etc/chapgate/scripts")]);
}

#[test]
fn test_unknown_field_rejected() {
    let result = ChapgateConfig::from_toml_str("backend = \"/bin/true\"");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_unknown_digest_rejected() {
    let result = ChapgateConfig::from_toml_str("enabled_digest = \"sha1\"");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// =============================================================================
// validation
// =============================================================================

#[test]
fn test_conflicting_backends() {
    let result = ChapgateConfig::from_toml_str(
        r#"
        backend_command = "/bin/true"
        pybackend_module_name = "policy"
        "#,
    );

    assert!(matches!(result, Err(ConfigError::ConflictingBackends)));
}

#[test]
fn test_relative_command() {
    let result = ChapgateConfig::from_toml_str("backend_command = \"bin/chap-secret\"");

    match result {
        Err(ConfigError::RelativeCommand(path)) => {
            assert_eq!(path, PathBuf::from("bin/chap-secret"));
        }
        other => panic!("Expected RelativeCommand, got {other:?}"),
    }
}

#[test]
fn test_empty_module_name() {
    let result = ChapgateConfig::from_toml_str("pybackend_module_name = \"\"");

    assert!(matches!(result, Err(ConfigError::EmptyModuleName)));
}

// =============================================================================
// plugin options
// =============================================================================

#[test]
fn test_from_options() {
    let config = ChapgateConfig::from_options([("backend_command", "/usr/libexec/chap-secret")])
        .expect("Failed to from_options(..)");

    assert_eq!(
        config.backend_command,
        Some(PathBuf::from("/usr/libexec/chap-secret"))
    );
    assert_eq!(config.enabled_digest, DigestKind::MsChapV2);
}

#[test]
fn test_from_options_unknown_name() {
    let result = ChapgateConfig::from_options([("backend_cmd", "/bin/true")]);

    assert!(matches!(result, Err(ConfigError::UnknownOption(name)) if name == "backend_cmd"));
}

#[test]
fn test_from_options_validates() {
    let result = ChapgateConfig::from_options([
        ("backend_command", "/bin/true"),
        ("pybackend_module_name", "policy"),
    ]);

    assert!(matches!(result, Err(ConfigError::ConflictingBackends)));
}

#[test]
fn test_apply_option_overrides() {
    let mut config = ChapgateConfig::default();

    config
        .apply_option("pybackend_module_name", "first")
        .expect("Failed to apply_option(..)");
    config
        .apply_option("pybackend_module_name", "second")
        .expect("Failed to apply_option(..)");

    assert_eq!(config.pybackend_module_name.as_deref(), Some("second"));
}

// =============================================================================
// files
// =============================================================================

#[test]
fn test_load_file() {
    let dir = tempfile::tempdir().expect("Failed to tempdir()");
    let path = dir.path().join("chapgate.toml");
    fs::write(&path, "enabled_digest = \"ms-chap\"\n").expect("Failed to write(..)");

    let config = ChapgateConfig::load(&path).expect("Failed to load(..)");

    assert_eq!(config.enabled_digest, DigestKind::MsChap);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to tempdir()");
    let path = dir.path().join("absent.toml");

    let err = ChapgateConfig::load(&path).expect_err("Expected load(..) to fail");

    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
