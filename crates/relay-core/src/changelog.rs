//! Changelog lookup for a version.
//!
//! The changelog for a version is the body of its `## <version>`
//! section in the project's `CHANGELOG.md`. Content is opaque to the
//! orchestrator; it is only displayed and forwarded to the platform.

use crate::error::Result;
use std::path::Path;

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Extract the changelog entry for `version` from `CHANGELOG.md` in
/// `project_dir`. Returns `Ok(None)` when the file or the section is
/// missing — absence is a branch, not an error.
pub fn for_version(project_dir: &Path, version: &str) -> Result<Option<String>> {
    let path = project_dir.join(CHANGELOG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(extract_section(&content, version))
}

/// Find the heading for `version` (any of `#`, `##`, `###`) and take
/// everything up to the next heading.
fn extract_section(content: &str, version: &str) -> Option<String> {
    let mut body: Option<String> = None;
    for line in content.lines() {
        match heading_version(line) {
            Some(v) if body.is_none() => {
                if v.contains(version) {
                    body = Some(String::new());
                }
            }
            Some(_) => break,
            None => {
                if let Some(b) = body.as_mut() {
                    b.push_str(line);
                    b.push('\n');
                }
            }
        }
    }
    let body = body?.trim().to_string();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// The version text of a markdown heading line, if it is one.
fn heading_version(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let hashes = trimmed.bytes().take_while(|b| *b == b'#').count();
    if (1..=3).contains(&hashes) && trimmed.as_bytes().get(hashes) == Some(&b' ') {
        Some(trimmed[hashes..].trim())
    } else {
        None
    }
}
