//! Packaging of the working directory for migration-code refresh.
//!
//! The platform accepts the packaged source as a zip; we shell out
//! to the system `zip` binary rather than reimplementing the format.

use crate::error::{RelayError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Paths that never belong in the uploaded archive.
const EXCLUDES: &[&str] = &[".git/*", "target/*", "node_modules/*", ".relay-app.json"];

fn zip_bin() -> Result<PathBuf> {
    which::which("zip").map_err(|_| RelayError::ZipNotInstalled)
}

/// Zip `project_dir` and return the archive bytes.
pub fn build(project_dir: &Path) -> Result<Vec<u8>> {
    let zip = zip_bin()?;
    let scratch = tempfile::TempDir::new()?;
    let archive = scratch.path().join("package.zip");

    let mut cmd = Command::new(zip);
    cmd.current_dir(project_dir)
        .arg("-q")
        .arg("-r")
        .arg(&archive)
        .arg(".");
    for pattern in EXCLUDES {
        cmd.arg("-x").arg(pattern);
    }

    let output = cmd.output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RelayError::Package(stderr));
    }
    Ok(std::fs::read(&archive)?)
}

/// Wire encoding for the `zip_file` body field.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
