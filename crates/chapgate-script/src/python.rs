// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CPython runtime on top of `pyo3`.
//!
//! The interpreter is process-wide and cannot be safely torn down and
//! brought back up, so [`finalize`](ForeignRuntime::finalize) only releases
//! references held here. The interpreter itself lives until process exit.

use std::path::PathBuf;
use std::sync::Arc;

use pyo3::IntoPyObject;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyInt, PyList, PyString, PyTuple};

use crate::runtime::{
    ForeignCallable, ForeignException, ForeignModule, ForeignRuntime, Resolution,
};
use crate::value::TypedValue;

const ARGV0: &str = "chapgate";

/// Embedded CPython.
#[derive(Debug, Default, Clone)]
pub struct PythonRuntime {
    script_paths: Vec<PathBuf>,
}

impl PythonRuntime {
    /// Creates a runtime that imports from the interpreter's default path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `paths` to `sys.path`, first entry searched first.
    pub fn with_script_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.script_paths.extend(paths);
        self
    }
}

impl ForeignRuntime for PythonRuntime {
    fn name(&self) -> &'static str {
        "python"
    }

    fn initialize(&mut self) -> Result<(), ForeignException> {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| -> PyResult<()> {
            let sys = py.import("sys")?;
            sys.setattr("argv", PyList::new(py, [ARGV0])?)?;

            let path = sys.getattr("path")?;
            for dir in self.script_paths.iter().rev() {
                path.call_method1("insert", (0, dir.to_string_lossy().into_owned()))?;
            }

            Ok(())
        })
        .map_err(|e| Python::with_gil(|py| exception(py, e)))
    }

    fn import(&mut self, module: &str) -> Result<Arc<dyn ForeignModule>, ForeignException> {
        Python::with_gil(|py| match py.import(module) {
            Ok(loaded) => Ok(Arc::new(PythonModule {
                name: module.to_owned(),
                module: loaded.unbind(),
            }) as Arc<dyn ForeignModule>),
            Err(e) => Err(exception(py, e)),
        })
    }

    fn finalize(&mut self) {
        tracing::debug!("python interpreter stays resident until process exit");
    }
}

struct PythonModule {
    name: String,
    module: Py<PyModule>,
}

impl ForeignModule for PythonModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, attr: &str) -> Resolution {
        Python::with_gil(|py| match self.module.bind(py).getattr(attr) {
            Ok(obj) if obj.is_callable() => Resolution::Callable(Box::new(PythonCallable {
                function: obj.unbind(),
            })),
            Ok(_) => Resolution::NotCallable,
            Err(_) => Resolution::Missing,
        })
    }
}

struct PythonCallable {
    function: PyObject,
}

impl ForeignCallable for PythonCallable {
    fn call(&self, args: &[TypedValue]) -> Result<TypedValue, ForeignException> {
        Python::with_gil(|py| {
            let result = args
                .iter()
                .map(|arg| to_python(py, arg))
                .collect::<PyResult<Vec<_>>>()
                .and_then(|args| PyTuple::new(py, args))
                .and_then(|args| self.function.bind(py).call1(args));

            match result {
                Ok(value) => Ok(from_python(&value)),
                Err(e) => Err(exception(py, e)),
            }
        })
    }
}

fn to_python(py: Python<'_>, value: &TypedValue) -> PyResult<PyObject> {
    let obj = match value {
        TypedValue::None | TypedValue::Foreign(_) => py.None(),
        TypedValue::Bool(b) => PyBool::new(py, *b).to_owned().into_any().unbind(),
        TypedValue::Int(i) => (*i).into_pyobject(py)?.into_any().unbind(),
        TypedValue::Str(s) => PyString::new(py, s.as_str()).into_any().unbind(),
        TypedValue::Bytes(b) => PyBytes::new(py, b.as_slice()).into_any().unbind(),
    };

    Ok(obj)
}

fn from_python(obj: &Bound<'_, PyAny>) -> TypedValue {
    if obj.is_none() {
        return TypedValue::None;
    }

    // bool is a subclass of int; test it first.
    if let Ok(b) = obj.downcast::<PyBool>() {
        return TypedValue::Bool(b.is_true());
    }

    if obj.is_instance_of::<PyInt>() {
        return match obj.extract::<i64>() {
            Ok(i) => TypedValue::Int(i),
            Err(_) => TypedValue::Foreign("int (out of range)".into()),
        };
    }

    if let Ok(s) = obj.downcast::<PyString>() {
        return match s.to_str() {
            Ok(text) => TypedValue::str(text),
            Err(_) => TypedValue::Foreign("str (not UTF-8)".into()),
        };
    }

    if let Ok(b) = obj.downcast::<PyBytes>() {
        return TypedValue::bytes(b.as_bytes());
    }

    let name = obj
        .get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "object".into());

    TypedValue::Foreign(name)
}

/// Prints the traceback to stderr and captures the exception.
fn exception(py: Python<'_>, err: PyErr) -> ForeignException {
    let kind = err
        .get_type(py)
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "Exception".into());
    let message = err.value(py).to_string();
    err.print(py);

    ForeignException::new(kind, message)
}
