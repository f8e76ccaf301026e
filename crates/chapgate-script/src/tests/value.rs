// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{HookError, TypedValue};

#[test]
fn test_as_bool_is_strict() {
    assert_eq!(TypedValue::Bool(true).as_bool(), Ok(true));
    assert_eq!(
        TypedValue::Int(1).as_bool(),
        Err(HookError::TypeMismatch {
            expected: "bool",
            found: "int".into(),
        })
    );
    assert!(TypedValue::None.as_bool().is_err());
}

#[test]
fn test_as_str() {
    assert_eq!(TypedValue::str("s3cret").as_str(), Ok("s3cret"));
    assert!(TypedValue::bytes(b"s3cret".to_vec()).as_str().is_err());
}

#[test]
fn test_as_secret_bytes_accepts_text_and_bytes() {
    assert_eq!(
        TypedValue::str("s3cret").as_secret_bytes(),
        Ok(&b"s3cret"[..])
    );
    assert_eq!(
        TypedValue::bytes(b"s3cret".to_vec()).as_secret_bytes(),
        Ok(&b"s3cret"[..])
    );
    assert_eq!(
        TypedValue::Int(42).as_secret_bytes(),
        Err(HookError::TypeMismatch {
            expected: "str",
            found: "int".into(),
        })
    );
}

#[test]
fn test_as_uint32_bounds() {
    assert_eq!(TypedValue::Int(0).as_uint32(), Ok(0));
    assert_eq!(TypedValue::Int(0x0A00_0001).as_uint32(), Ok(0x0A00_0001));
    assert_eq!(TypedValue::Int(i64::from(u32::MAX)).as_uint32(), Ok(u32::MAX));
    assert!(TypedValue::Int(-1).as_uint32().is_err());
    assert!(TypedValue::Int(i64::from(u32::MAX) + 1).as_uint32().is_err());
    assert!(TypedValue::str("10.0.0.1").as_uint32().is_err());
    assert!(TypedValue::Bool(true).as_uint32().is_err());
}

#[test]
fn test_foreign_type_name_is_reported() {
    let err = TypedValue::Foreign("list".into())
        .as_bool()
        .expect_err("Expected as_bool() to fail");

    assert_eq!(err.to_string(), "expected bool, hook returned list");
}

#[test]
fn test_debug_redacts_payloads() {
    let text = format!("{:?}", TypedValue::str("s3cret"));
    let bytes = format!("{:?}", TypedValue::bytes(b"s3cret".to_vec()));

    assert!(!text.contains("s3cret"));
    assert!(!bytes.contains("s3cret"));
    assert_eq!(format!("{:?}", TypedValue::Int(7)), "Int(7)");
}

#[test]
fn test_conversions() {
    assert_eq!(TypedValue::from(true), TypedValue::Bool(true));
    assert_eq!(TypedValue::from(-3i32), TypedValue::Int(-3));
    assert_eq!(TypedValue::from(7u32), TypedValue::Int(7));
    assert_eq!(TypedValue::from("x"), TypedValue::str("x"));
    assert!(TypedValue::None.is_none());
}

proptest! {
    #[test]
    fn prop_as_uint32_matches_range(i in any::<i64>()) {
        let result = TypedValue::Int(i).as_uint32();

        prop_assert_eq!(result.is_ok(), (0..=i64::from(u32::MAX)).contains(&i));
        if let Ok(v) = result {
            prop_assert_eq!(i64::from(v), i);
        }
    }

    #[test]
    fn prop_u32_survives_boundary(addr in any::<u32>()) {
        prop_assert_eq!(TypedValue::from(addr).as_uint32(), Ok(addr));
    }

    #[test]
    fn prop_secret_bytes_never_in_debug(secret in "[a-z0-9]{8,32}") {
        let value = TypedValue::str(secret.clone());

        prop_assert_eq!(value.as_secret_bytes(), Ok(secret.as_bytes()));
        let debug = format!("{value:?}");
        prop_assert!(!debug.contains(&secret));
    }
}
