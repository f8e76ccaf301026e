// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tagged union for values crossing the hook boundary.

use core::fmt;

use zeroize::Zeroizing;

use crate::error::HookError;

/// A value passed to or returned from a hook.
///
/// String and byte payloads may carry secrets; they are zeroized on drop and
/// redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// The runtime's null value.
    None,
    /// A boolean.
    Bool(bool),
    /// An integer that fits in `i64`.
    Int(i64),
    /// A text string.
    Str(Zeroizing<String>),
    /// A byte string.
    Bytes(Zeroizing<Vec<u8>>),
    /// Any other foreign object, identified by its type name.
    Foreign(String),
}

impl TypedValue {
    /// Wraps a text string.
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(Zeroizing::new(s.into()))
    }

    /// Wraps a byte string.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Zeroizing::new(b.into()))
    }

    /// Short name of the variant, as reported in type mismatches.
    pub fn type_name(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Foreign(name) => name,
        }
    }

    /// Returns `true` for [`TypedValue::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The boolean, strictly. Integers are not truthy here.
    pub fn as_bool(&self) -> Result<bool, HookError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    /// The integer.
    pub fn as_int(&self) -> Result<i64, HookError> {
        match self {
            Self::Int(i) => Ok(*i),
            other => Err(other.mismatch("int")),
        }
    }

    /// The text string.
    pub fn as_str(&self) -> Result<&str, HookError> {
        match self {
            Self::Str(s) => Ok(s.as_str()),
            other => Err(other.mismatch("str")),
        }
    }

    /// Secret material from a text or byte string.
    pub fn as_secret_bytes(&self) -> Result<&[u8], HookError> {
        match self {
            Self::Str(s) => Ok(s.as_bytes()),
            Self::Bytes(b) => Ok(b.as_slice()),
            other => Err(other.mismatch("str")),
        }
    }

    /// An integer in `0..=u32::MAX`, as used for IPv4 addresses.
    pub fn as_uint32(&self) -> Result<u32, HookError> {
        match self {
            Self::Int(i) => u32::try_from(*i).map_err(|_| HookError::TypeMismatch {
                expected: "uint32",
                found: format!("int {i}"),
            }),
            other => Err(other.mismatch("uint32")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> HookError {
        HookError::TypeMismatch {
            expected,
            found: self.type_name().to_owned(),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for TypedValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for TypedValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        Self::str(s)
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        Self::str(s)
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Int(i) => write!(f, "Int({i})"),
            Self::Str(_) => f.write_str("Str([REDACTED])"),
            Self::Bytes(_) => f.write_str("Bytes([REDACTED])"),
            Self::Foreign(name) => write!(f, "Foreign({name})"),
        }
    }
}
