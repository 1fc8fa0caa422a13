//! Configuration file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::ProbeConfig;
use crate::error::{ProbeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".pkgprobe";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.pkgprobe/config.yml`)
/// 2. Local overrides (`.pkgprobe/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .pkgprobe/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .pkgprobe/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into ProbeConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProbeConfig> {
    let value = load_config_value(path)?;
    from_value(value, path)
}

/// Parse YAML content into ProbeConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProbeConfig> {
    serde_yaml::from_str(content).map_err(|e| ProbeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::Io(e)
        }
    })?;

    // An empty file is an empty mapping, not a null document.
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| ProbeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project config with its local overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<ProbeConfig> {
    let paths = ConfigPaths::discover(project_root);
    let Some(project) = &paths.project else {
        return Err(ProbeError::ConfigNotFound {
            path: project_root.join(CONFIG_DIR).join("config.yml"),
        });
    };

    let values = paths
        .all_existing()
        .into_iter()
        .map(|p| load_config_value(p))
        .collect::<Result<Vec<_>>>()?;

    from_value(merge_configs(&values), project)
}

/// Load configuration for a run.
///
/// An explicit path must exist. Without one, the project config is used
/// when present and defaults apply otherwise.
pub fn load_or_default(project_root: &Path, explicit: Option<&Path>) -> Result<ProbeConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    match load_merged_config(project_root) {
        Ok(config) => Ok(config),
        Err(ProbeError::ConfigNotFound { path }) => {
            tracing::debug!(path = %path.display(), "no project config, using defaults");
            Ok(ProbeConfig::default())
        }
        Err(e) => Err(e),
    }
}

fn from_value(value: serde_yaml::Value, source_path: &Path) -> Result<ProbeConfig> {
    serde_yaml::from_value(value).map_err(|e| ProbeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
