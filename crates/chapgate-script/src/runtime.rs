// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Seam between the host and a concrete interpreter.

use core::fmt;
use std::sync::Arc;

use crate::value::TypedValue;

/// An exception raised inside the foreign runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignException {
    /// Exception type, e.g. `ValueError`.
    pub kind: String,
    /// Exception message.
    pub message: String,
}

impl ForeignException {
    /// Creates an exception record.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ForeignException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// An embeddable interpreter.
///
/// The host calls [`initialize`](Self::initialize) at most once before the
/// first import and [`finalize`](Self::finalize) at most once at shutdown,
/// always under its lock.
pub trait ForeignRuntime: Send {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Brings the interpreter up.
    fn initialize(&mut self) -> Result<(), ForeignException>;

    /// Imports `module` by name.
    fn import(&mut self, module: &str) -> Result<Arc<dyn ForeignModule>, ForeignException>;

    /// Tears the interpreter down.
    fn finalize(&mut self);
}

impl<R: ForeignRuntime + ?Sized> ForeignRuntime for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self) -> Result<(), ForeignException> {
        (**self).initialize()
    }

    fn import(&mut self, module: &str) -> Result<Arc<dyn ForeignModule>, ForeignException> {
        (**self).import(module)
    }

    fn finalize(&mut self) {
        (**self).finalize()
    }
}

/// A loaded module whose attributes can be looked up by name.
pub trait ForeignModule: Send + Sync {
    /// Name the module was imported under.
    fn name(&self) -> &str;

    /// Looks up attribute `attr`.
    fn resolve(&self, attr: &str) -> Resolution;
}

/// Outcome of an attribute lookup.
pub enum Resolution {
    /// The attribute exists and can be called.
    Callable(Box<dyn ForeignCallable>),
    /// The attribute exists but is not callable.
    NotCallable,
    /// No such attribute.
    Missing,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable"),
            Self::NotCallable => f.write_str("NotCallable"),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

/// A resolved foreign function.
pub trait ForeignCallable: Send {
    /// Calls the function with positional `args`.
    fn call(&self, args: &[TypedValue]) -> Result<TypedValue, ForeignException>;
}
