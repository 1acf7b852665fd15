//! Client configuration
//!
//! Everything here is passed through to the HTTP/auth layers unmodified;
//! the only logic is default-project resolution from the environment and
//! gcloud configuration.

use crate::auth::DEFAULT_SCOPES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_ENDPOINT: &str = "https://cloudresourcemanager.googleapis.com";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_user_agent() -> String {
    concat!("gcrm/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint, overridable for tests and private endpoints
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// OAuth scopes requested for access tokens
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Default project id used when `project()` is called without one
    #[serde(default)]
    pub project_id: Option<String>,
    /// User-Agent header for outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            scopes: default_scopes(),
            project_id: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Get the effective default project (explicit config > environment >
    /// gcloud configuration)
    pub fn effective_project(&self) -> Option<String> {
        self.project_id.clone().or_else(default_project)
    }
}

/// Validate a GCP project ID format
///
/// Project IDs must be 6-30 characters, lowercase letters, digits, and
/// hyphens. Must start with a letter and cannot end with a hyphen.
pub fn validate_project_id(project: &str) -> bool {
    if project.len() < 6 || project.len() > 30 {
        return false;
    }

    match project.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }

    if project.ends_with('-') {
        return false;
    }

    project
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Get the gcloud configuration directory
fn gcloud_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CLOUDSDK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("gcloud"))
}

/// Read the default project from the environment or gcloud configuration
///
/// Checked in order: `CLOUDSDK_CORE_PROJECT`, `GOOGLE_CLOUD_PROJECT`,
/// `GCLOUD_PROJECT`, then the active gcloud configuration file. Values
/// that fail [`validate_project_id`] are skipped.
pub fn default_project() -> Option<String> {
    for var in ["CLOUDSDK_CORE_PROJECT", "GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"] {
        if let Ok(project) = std::env::var(var) {
            if validate_project_id(&project) {
                return Some(project);
            }
            tracing::warn!("Invalid project ID format in {}", var);
        }
    }

    let config_dir = gcloud_config_dir()?;

    // Legacy single-file properties
    if let Some(project) = project_from_config_file(&config_dir.join("properties")) {
        return Some(project);
    }

    // Active named configuration
    let active = std::fs::read_to_string(config_dir.join("active_config")).ok()?;
    let config_name = active.trim();

    // Security: validate config name to prevent path traversal
    if !config_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        tracing::warn!("Invalid characters in active_config name");
        return None;
    }

    project_from_config_file(
        &config_dir
            .join("configurations")
            .join(format!("config_{}", config_name)),
    )
}

/// Extract `project = ...` from the `[core]` section of a gcloud ini file.
/// The legacy `properties` file starts outside any section, which reads as
/// `[core]` for our purposes.
fn project_from_config_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;

    let mut in_other_section = false;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            in_other_section = line != "[core]";
            continue;
        }
        if !in_other_section && line.starts_with("project") && line.contains('=') {
            if let Some(value) = line.split('=').nth(1) {
                let project = value.trim().to_string();
                if validate_project_id(&project) {
                    return Some(project);
                }
            }
        }
    }

    None
}
