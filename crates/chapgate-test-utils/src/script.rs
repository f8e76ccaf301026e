// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Executable `/bin/sh` script in a private temporary directory.
///
/// The directory, and the script with it, is removed on drop.
#[derive(Debug)]
pub struct BackendScript {
    _dir: TempDir,
    path: PathBuf,
}

impl BackendScript {
    /// Writes `body` after a `#!/bin/sh` line and marks it executable.
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to tempdir()");
        let path = dir.path().join("backend.sh");

        {
            let mut file = File::create(&path).expect("Failed to create backend script");
            writeln!(file, "#!/bin/sh").expect("Failed to write shebang");
            writeln!(file, "{body}").expect("Failed to write script body");
            file.sync_all().expect("Failed to sync_all()");
        }

        let mut perms = fs::metadata(&path)
            .expect("Failed to metadata(..)")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set_permissions(..)");

        Self { _dir: dir, path }
    }

    /// Script printing `line` and exiting with `code`.
    pub fn printing(line: &str, code: i32) -> Self {
        Self::new(&format!("printf '%s\\n' '{line}'\nexit {code}"))
    }

    /// Absolute path of the script.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
