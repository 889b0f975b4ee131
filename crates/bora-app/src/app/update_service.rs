//! Update Service - remote version check on startup
//!
//! The publisher serves `version.txt` (a decimal number such as `1.3`) next
//! to the artifact. When the remote number is larger than the local marker,
//! the artifact is downloaded over the local copy and the marker rewritten.
//! Failures never stop the caller; they are logged and reported as skipped.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use bora_infra::remote::{HttpRemoteSource, RemoteSource};
use bora_types::{Error, Result};

use crate::config::Config;

pub const VERSION_FILE: &str = "version.txt";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    Updated { from: f64, to: f64, artifact: PathBuf },
    UpToDate { local: f64, remote: f64 },
    Skipped { reason: String },
    Disabled,
}

impl std::fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateStatus::Updated { from, to, artifact } => {
                write!(f, "Updated {} -> {} ({})", from, to, artifact.display())
            }
            UpdateStatus::UpToDate { local, .. } => write!(f, "Up to date (version {})", local),
            UpdateStatus::Skipped { reason } => write!(f, "Update check skipped: {}", reason),
            UpdateStatus::Disabled => write!(f, "Update check disabled"),
        }
    }
}

/// Parse a version marker. Anything unreadable counts as 0.0.
pub fn parse_version(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub struct UpdateService<S: RemoteSource> {
    source: S,
    base_url: String,
    artifact: String,
    state_dir: PathBuf,
}

impl<S: RemoteSource> UpdateService<S> {
    pub fn new(source: S, base_url: impl Into<String>, artifact: impl Into<String>, state_dir: PathBuf) -> Self {
        Self {
            source,
            base_url: base_url.into(),
            artifact: artifact.into(),
            state_dir,
        }
    }

    fn url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.state_dir.join(VERSION_FILE)
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.state_dir.join(&self.artifact)
    }

    pub fn local_version(&self) -> f64 {
        std::fs::read_to_string(self.marker_path())
            .map(|text| parse_version(&text))
            .unwrap_or(0.0)
    }

    /// Compare versions and download when the remote one is newer
    pub fn check(&self) -> Result<UpdateStatus> {
        let local = self.local_version();
        let remote_text = self.source.fetch_text(&self.url(VERSION_FILE))?;
        let remote = remote_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::Network(format!("bad remote version '{}'", remote_text.trim())))?;
        debug!(local, remote, "version check");

        if remote <= local {
            return Ok(UpdateStatus::UpToDate { local, remote });
        }

        let bytes = self.source.fetch_bytes(&self.url(&self.artifact))?;
        std::fs::create_dir_all(&self.state_dir)?;
        let artifact = self.artifact_path();
        write_replacing(&artifact, &bytes)?;
        std::fs::write(self.marker_path(), remote_text.trim())?;
        info!(from = local, to = remote, path = %artifact.display(), "artifact updated");

        Ok(UpdateStatus::Updated {
            from: local,
            to: remote,
            artifact,
        })
    }

    /// Same as `check`, but any failure becomes `Skipped`
    pub fn check_and_update(&self) -> UpdateStatus {
        match self.check() {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "update check failed, continuing");
                UpdateStatus::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Write via a `.part` sibling, then rename over the target
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Run the check with the configured settings. `url_override` replaces the
/// configured base URL and forces the check even when disabled.
pub fn run_startup_check(config: &Config, url_override: Option<&str>) -> UpdateStatus {
    if url_override.is_none() && !config.update.enabled {
        return UpdateStatus::Disabled;
    }
    let Some(base_url) = url_override.or(config.update.base_url.as_deref()) else {
        return UpdateStatus::Skipped {
            reason: "no update URL configured".to_string(),
        };
    };

    let state_dir = match config.update_state_dir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!(error = %e, "no state directory for update check");
            return UpdateStatus::Skipped {
                reason: e.to_string(),
            };
        }
    };

    match HttpRemoteSource::new(Duration::from_secs(config.update.timeout_secs)) {
        Ok(source) => {
            UpdateService::new(source, base_url, config.update.artifact.clone(), state_dir)
                .check_and_update()
        }
        Err(e) => {
            warn!(error = %e, "HTTP client unavailable, skipping update check");
            UpdateStatus::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
