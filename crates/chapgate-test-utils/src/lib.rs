// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for chapgate crates.
//!
//! ## License
//!
//! GPL-3.0-only

mod digest;
mod script;

pub use digest::{Md5Chap, RecordingDigest};
pub use script::BackendScript;
