//! Credentials and app-link configuration.
//!
//! Layout:
//!   ~/.relayrc         — `{"deploy_key": "..."}`  (per-user, created by login)
//!   ./.relay-app.json  — `{"id": 1234}`           (per-project, created by link)
//!
//! `RELAY_DEPLOY_KEY` overrides the rc file, and `RELAY_ENDPOINT`
//! overrides the production API base URL.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://api.relay-platform.dev/v1";

pub const DEPLOY_KEY_ENV: &str = "RELAY_DEPLOY_KEY";
pub const ENDPOINT_ENV: &str = "RELAY_ENDPOINT";

pub const RC_FILE: &str = ".relayrc";
pub const APP_LINK_FILE: &str = ".relay-app.json";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub deploy_key: String,
}

impl Credentials {
    /// Resolve the deploy key: environment first, then `~/.relayrc`.
    pub fn load() -> Result<Credentials> {
        if let Ok(key) = std::env::var(DEPLOY_KEY_ENV) {
            if !key.is_empty() {
                return Ok(Credentials { deploy_key: key });
            }
        }
        let home = home::home_dir().ok_or(RelayError::HomeNotFound)?;
        Credentials::load_from(&home.join(RC_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Credentials> {
        if !path.exists() {
            return Err(RelayError::NotAuthenticated);
        }
        let content = std::fs::read_to_string(path)?;
        let creds: Credentials = serde_json::from_str(&content)?;
        if creds.deploy_key.is_empty() {
            return Err(RelayError::NotAuthenticated);
        }
        Ok(creds)
    }
}

// ---------------------------------------------------------------------------
// App link
// ---------------------------------------------------------------------------

/// The project-directory sidecar identifying which app this source
/// tree belongs to. Written by `relay link`; read fresh per command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLink {
    pub id: u64,
}

impl AppLink {
    pub fn load(project_dir: &Path) -> Result<AppLink> {
        let path = project_dir.join(APP_LINK_FILE);
        if !path.exists() {
            return Err(RelayError::NotLinked);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = project_dir.join(APP_LINK_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// API base URL, `RELAY_ENDPOINT` override first.
pub fn endpoint() -> String {
    match std::env::var(ENDPOINT_ENV) {
        Ok(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}
